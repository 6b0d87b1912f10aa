//! Feedback события (симуляция → звук/UI движка)

use bevy::prelude::*;

use crate::components::{DamageOverlay, GhostId};

/// Топор попал по призраку (звук удара)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GhostHit {
    pub ghost: GhostId,
    pub remaining_health: i32,
}

/// Призрак уничтожен (звук смерти, счётчик убийств уже обновлён)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GhostDied {
    pub ghost: GhostId,
    pub kills: u32,
}

/// Призрак ударил игрока (запуск looped «тяжёлого дыхания»)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerHit {
    pub by: GhostId,
    pub health: i32,
}

/// Регенерация завершилась: здоровье полное, дыхание остановить
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerRecovered;

/// Игрок погиб: переход на экран смерти, остановить feedback
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerDied {
    pub kills: u32,
    pub round: u32,
}

/// Оверлей урона сменился (`DamageOverlay::None` = снять)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct OverlayChanged {
    pub overlay: DamageOverlay,
}
