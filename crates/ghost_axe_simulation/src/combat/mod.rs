//! Combat module: топор, урон игроку, feedback события
//!
//! Симуляция отвечает за:
//! - Weapon: анимацию замаха (offset) и переход в возврат по попаданию
//! - check_damage: урон от касаний, кулдауны, регенерацию, оверлеи
//! - События GhostHit/GhostDied/PlayerHit/... для звука и UI
//!
//! Движок отвечает за:
//! - collision shapes топора/призраков/игрока
//! - ContactEvent (start/end) → InputState
//!
//! Урон призракам считает `ghost::behaviour::resolve_weapon_hit`.

use bevy::prelude::*;

pub mod damage;
pub mod events;
pub mod weapon;


// Re-export основных типов
pub use damage::{check_damage, DamageReport, Dead, GHOST_HIT_COOLDOWN, GHOST_TOUCH_DAMAGE, REGEN_DELAY};
pub use events::{GhostDied, GhostHit, OverlayChanged, PlayerDied, PlayerHit, PlayerRecovered};
pub use weapon::{SwingPhase, Weapon, AXE_EXTENDED, AXE_REST};

/// Combat Plugin
///
/// Только регистрация событий: системы урона вызываются из update'ов
/// игрока и призраков (порядок внутри кадра задаёт SimulationSet).
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GhostHit>()
            .add_event::<GhostDied>()
            .add_event::<PlayerHit>()
            .add_event::<PlayerRecovered>()
            .add_event::<PlayerDied>()
            .add_event::<OverlayChanged>();
    }
}
