//! Input/collision события (движок-биндинг → симуляция)
//!
//! Публичная pub/sub поверхность ядра: движок шлёт эти события,
//! `input::systems` переносит их в `InputState` в начале кадра.

use bevy::prelude::*;

use crate::components::GhostId;
use crate::input::state::{ContactActor, Control};

/// Нажатие/отпускание контрола (press и release: отдельные события).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ControlEvent {
    pub control: Control,
    pub pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Started,
    Ended,
}

/// Коллизия призрака с топором/игроком.
///
/// На каждый физический контакт приходит пара Started/Ended.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub actor: ContactActor,
    pub ghost: GhostId,
    pub phase: ContactPhase,
}

impl ContactEvent {
    pub fn started(actor: ContactActor, ghost: GhostId) -> Self {
        Self { actor, ghost, phase: ContactPhase::Started }
    }

    pub fn ended(actor: ContactActor, ghost: GhostId) -> Self {
        Self { actor, ghost, phase: ContactPhase::Ended }
    }
}

/// Призрак `ghost` упёрся в призрака `other`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProximityEvent {
    pub ghost: GhostId,
    pub other: GhostId,
}

/// Смещение указателя с прошлого кадра (нормализованные координаты окна).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PointerMotion {
    pub delta: Vec2,
}

/// Накопленное смещение указателя за кадр; потребляется update'ом игрока.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerDelta(pub Vec2);

impl PointerDelta {
    pub fn take(&mut self) -> Vec2 {
        std::mem::take(&mut self.0)
    }
}

/// Игрок впервые нажал exit (edge).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitRequested;
