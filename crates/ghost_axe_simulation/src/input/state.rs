//! InputState: общий контекст кадра
//!
//! Один Resource вместо глобального event handler'а:
//! - состояние контролов (WASD / exit / attack)
//! - ledger контактов топор↔призрак и призрак↔игрок
//! - ghost→ghost avoidance targets
//!
//! Пишется внешними событиями (коллизии, ввод) и update'ами entity в свой тик.
//! Всё на одном simulation thread: локи не нужны.

use bevy::prelude::*;

use crate::components::GhostId;
use crate::input::gesture::Gesture;
use crate::timer::CooldownTimer;

/// Именованные контролы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Control {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Exit,
    Attack,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::Forward,
        Control::Back,
        Control::StrafeLeft,
        Control::StrafeRight,
        Control::Exit,
        Control::Attack,
    ];

    pub const MOVEMENT: [Control; 4] = [
        Control::Forward,
        Control::Back,
        Control::StrafeLeft,
        Control::StrafeRight,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Control::Forward => "forward",
            Control::Back => "back",
            Control::StrafeLeft => "strafeLeft",
            Control::StrafeRight => "strafeRight",
            Control::Exit => "exit",
            Control::Attack => "attack",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|control| control.name() == name)
    }
}

/// Кто касается призрака
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ContactActor {
    Weapon,
    Player,
}

/// Контакт призрака с игроком + кулдаун удара этого призрака
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerContact {
    pub touching: bool,
    pub cooldown: CooldownTimer,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    controls: [bool; Control::ALL.len()],
    /// Индекс = GhostId
    weapon_contacts: Vec<bool>,
    /// Индекс = GhostId
    player_contacts: Vec<PlayerContact>,
    /// true ⇔ хоть один призрак сейчас касается топора.
    /// Всегда пересчитывается из `weapon_contacts` после изменения флага.
    any_weapon_hit: bool,
    /// Индекс = GhostId, значение = кому уступаем дорогу. Может указывать на мёртвого.
    avoidance_targets: Vec<Option<GhostId>>,
}

impl InputState {
    // ------------------------------------------------------------------
    // Controls
    // ------------------------------------------------------------------

    /// Явная запись состояния (повторные одинаковые события безопасны).
    pub fn set_control(&mut self, control: Control, pressed: bool) {
        self.controls[control.index()] = pressed;
    }

    pub fn is_pressed(&self, control: Control) -> bool {
        self.controls[control.index()]
    }

    pub fn any_movement_pressed(&self) -> bool {
        Control::MOVEMENT.into_iter().any(|control| self.is_pressed(control))
    }

    /// Жест устройства → level-состояние `attack` (минуя press/release пару).
    pub fn apply_gesture(&mut self, gesture: Gesture) {
        self.set_control(Control::Attack, gesture.attack_pressed());
    }

    // ------------------------------------------------------------------
    // Roster capacity
    // ------------------------------------------------------------------

    /// Гарантирует слоты для id `0..len`.
    pub fn ensure_capacity(&mut self, len: usize) {
        if self.weapon_contacts.len() < len {
            self.weapon_contacts.resize(len, false);
        }
        if self.player_contacts.len() < len {
            self.player_contacts.resize(len, PlayerContact::default());
        }
        if self.avoidance_targets.len() < len {
            self.avoidance_targets.resize(len, None);
        }
    }

    // ------------------------------------------------------------------
    // Contacts (collision subsystem → state)
    // ------------------------------------------------------------------

    /// Начало контакта. No-op, если пара уже в контакте.
    /// Возвращает true, если состояние изменилось.
    pub fn on_contact_start(&mut self, actor: ContactActor, ghost: GhostId) -> bool {
        self.ensure_capacity(ghost.index() + 1);

        match actor {
            ContactActor::Weapon => {
                let touching = &mut self.weapon_contacts[ghost.index()];
                if *touching {
                    return false;
                }
                *touching = true;
                self.resync_weapon_hit();
                true
            }
            ContactActor::Player => {
                let contact = &mut self.player_contacts[ghost.index()];
                if contact.touching {
                    return false;
                }
                contact.touching = true;
                true
            }
        }
    }

    /// Конец контакта. No-op, если пара не в контакте.
    pub fn on_contact_end(&mut self, actor: ContactActor, ghost: GhostId) -> bool {
        match actor {
            ContactActor::Weapon => {
                let Some(touching) = self.weapon_contacts.get_mut(ghost.index()) else {
                    return false;
                };
                if !*touching {
                    return false;
                }
                *touching = false;
                self.resync_weapon_hit();
                true
            }
            ContactActor::Player => {
                let Some(contact) = self.player_contacts.get_mut(ghost.index()) else {
                    return false;
                };
                if !contact.touching {
                    return false;
                }
                contact.touching = false;
                true
            }
        }
    }

    /// ghost→ghost близость. Last write wins, события очистки нет:
    /// читатели обязаны проверять, что target ещё жив.
    pub fn on_proximity(&mut self, ghost: GhostId, other: GhostId) {
        if ghost == other {
            return;
        }
        self.ensure_capacity(ghost.index().max(other.index()) + 1);
        self.avoidance_targets[ghost.index()] = Some(other);
    }

    pub fn weapon_contact(&self, ghost: GhostId) -> bool {
        self.weapon_contacts.get(ghost.index()).copied().unwrap_or(false)
    }

    pub fn any_weapon_hit(&self) -> bool {
        self.any_weapon_hit
    }

    /// Пересчитать агрегат из per-ghost флагов.
    ///
    /// Вызывается после каждого изменения `weapon_contacts` и топором в покое.
    /// Призрак, всё ещё касающийся лезвия, оставляет агрегат true.
    pub fn resync_weapon_hit(&mut self) {
        self.any_weapon_hit = self.weapon_contacts.iter().any(|touching| *touching);
    }

    pub fn player_contact(&self, ghost: GhostId) -> Option<&PlayerContact> {
        self.player_contacts.get(ghost.index())
    }

    /// Игрок держится призраком (контакт): призрак не двигается.
    pub fn is_touching_player(&self, ghost: GhostId) -> bool {
        self.player_contact(ghost).is_some_and(|contact| contact.touching)
    }

    pub fn player_contacts_mut(&mut self) -> impl Iterator<Item = (GhostId, &mut PlayerContact)> {
        self.player_contacts
            .iter_mut()
            .enumerate()
            .map(|(index, contact)| (GhostId(index), contact))
    }

    pub fn avoidance_target(&self, ghost: GhostId) -> Option<GhostId> {
        self.avoidance_targets.get(ghost.index()).copied().flatten()
    }

    pub fn clear_avoidance_target(&mut self, ghost: GhostId) {
        if let Some(target) = self.avoidance_targets.get_mut(ghost.index()) {
            *target = None;
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Освободить записи, которыми владеет уничтоженный призрак.
    ///
    /// Contact-end от него уже не придёт, поэтому агрегат пересчитываем сразу.
    /// Чужие avoidance targets, указывающие на этот id, остаются stale.
    pub fn release_ghost(&mut self, ghost: GhostId) {
        if let Some(touching) = self.weapon_contacts.get_mut(ghost.index()) {
            *touching = false;
        }
        self.resync_weapon_hit();
        if let Some(contact) = self.player_contacts.get_mut(ghost.index()) {
            *contact = PlayerContact::default();
        }
        self.clear_avoidance_target(ghost);
    }

    /// Полный сброс (новая сессия)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
