//! Player компоненты: позиция/ориентация камеры, скорость, здоровье, оверлей урона

use bevy::prelude::*;

use crate::combat::Weapon;
use crate::components::RenderPose;
use crate::timer::CooldownTimer;

pub const PLAYER_MAX_HEALTH: i32 = 15;
pub const PLAYER_START: Vec3 = Vec3::new(0.0, -10.0, 2.0);

/// Визуальный оверлей урона (кровь на экране)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum DamageOverlay {
    #[default]
    None,
    /// health == 10
    Wounded,
    /// health == 5
    Critical,
}

impl DamageOverlay {
    /// Оверлей, который включается при health ровно на пороге.
    /// Между порогами: None (оставляем текущий).
    pub fn for_threshold(health: i32) -> Option<Self> {
        match health {
            10 => Some(DamageOverlay::Wounded),
            5 => Some(DamageOverlay::Critical),
            _ => None,
        }
    }
}

/// Игрок (first-person камера)
///
/// Собственного node у игрока нет: движок двигает камеру по `RenderPose`.
/// Топор (`Weapon`) живёт на том же entity через Required Components.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Weapon, RenderPose)]
pub struct Player {
    pub position: Vec3,
    /// Градусы; рост heading = поворот влево
    pub heading: f32,
    pub pitch: f32,
    pub roll: f32,
    /// Скалярная скорость (units/sec), >= 0
    pub speed: f32,
    /// Радианы; направление для инерционного «доката» без ввода
    pub last_moving_heading: f32,
    /// Инвариант: health >= 0
    pub health: i32,
    /// Таймер до полной регенерации
    pub regen: CooldownTimer,
    pub overlay: DamageOverlay,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: PLAYER_START,
            heading: 0.0,
            pitch: 0.0,
            roll: 0.0,
            speed: 0.0,
            last_moving_heading: 0.0,
            health: PLAYER_MAX_HEALTH,
            regen: CooldownTimer::default(),
            overlay: DamageOverlay::None,
        }
    }
}

impl Player {
    pub fn planar_position(&self) -> Vec2 {
        self.position.truncate()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Урон с клампом к нулю
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    /// Заменить оверлей. Возвращает true, если он реально сменился.
    pub fn swap_overlay(&mut self, overlay: DamageOverlay) -> bool {
        if self.overlay == overlay {
            return false;
        }
        self.overlay = overlay;
        true
    }

    /// Снять оверлей; отсутствие оверлея: no-op (false).
    pub fn clear_overlay(&mut self) -> bool {
        self.swap_overlay(DamageOverlay::None)
    }

    pub fn render_pose(&self) -> RenderPose {
        RenderPose {
            translation: self.position,
            hpr: Vec3::new(self.heading, self.pitch, self.roll),
            visible: true,
        }
    }
}
