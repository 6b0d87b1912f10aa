//! Урон игроку от касаний призраков, регенерация, оверлеи, смерть.

use bevy::prelude::*;

use crate::components::{DamageOverlay, GhostId, Player, PLAYER_MAX_HEALTH};
use crate::input::InputState;

/// Урон от одного касания призрака
pub const GHOST_TOUCH_DAMAGE: i32 = 5;

/// Кулдаун удара одного и того же призрака (секунды)
pub const GHOST_HIT_COOLDOWN: f64 = 3.0;

/// Задержка до полной регенерации после последнего удара (секунды)
pub const REGEN_DELAY: f64 = 4.0;

/// Компонент-маркер: игрок мёртв (health <= 0)
///
/// Per-frame update игрока с этим маркером не выполняется,
/// призраки замирают, пока нет живого игрока.
#[derive(Component, Debug)]
pub struct Dead;

/// Итог `check_damage` за один кадр (для событий/звука/UI)
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DamageReport {
    /// Призраки, чьё касание нанесло урон в этом кадре
    pub hits: Vec<GhostId>,
    pub died: bool,
    pub recovered: bool,
    /// Новый оверлей, если он сменился (`DamageOverlay::None` = снят)
    pub overlay_changed: Option<DamageOverlay>,
}

/// Проверка урона игроку (вызывается из update игрока до топора).
///
/// Для каждого слота контакта:
/// - касается, кулдаун Idle → урон, регенерация 4с, кулдаун призрака 3с
/// - касается, кулдаун истёк → то же самое (повторный удар)
/// - не касается, кулдаун истёк → кулдаун в Idle
///
/// Смерть прерывает проверку (регенерация/оверлеи не обрабатываются).
pub fn check_damage(player: &mut Player, input: &mut InputState, now: f64) -> DamageReport {
    let mut report = DamageReport::default();

    for (ghost, contact) in input.player_contacts_mut() {
        if contact.touching {
            if contact.cooldown.is_idle() || contact.cooldown.is_expired(now) {
                player.take_damage(GHOST_TOUCH_DAMAGE);
                player.regen.arm(now, REGEN_DELAY);
                contact.cooldown.arm(now, GHOST_HIT_COOLDOWN);
                report.hits.push(ghost);
            }
        } else if contact.cooldown.is_expired(now) {
            contact.cooldown.clear();
        }
    }

    if !player.is_alive() {
        report.died = true;
        if player.clear_overlay() {
            report.overlay_changed = Some(DamageOverlay::None);
        }
        return report;
    }

    if player.regen.is_expired(now) {
        player.health = PLAYER_MAX_HEALTH;
        player.regen.clear();
        report.recovered = true;
        if player.clear_overlay() {
            report.overlay_changed = Some(DamageOverlay::None);
        }
    }

    // Ровно на пороге (не «ниже или равно»)
    if let Some(overlay) = DamageOverlay::for_threshold(player.health) {
        if player.swap_overlay(overlay) {
            report.overlay_changed = Some(overlay);
        }
    }

    report
}
