//! Арена и render hand-off: ArenaBounds, RenderPose

use bevy::prelude::*;

/// Axis-aligned границы арены (плоскость XY, Z = высота).
///
/// Движение игрока за границы отклоняется без ошибки.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ArenaBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        // Чуть шире углов спавна призраков
        Self {
            min: Vec2::new(-58.0, -27.0),
            max: Vec2::new(46.0, 35.0),
        }
    }
}

impl ArenaBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Включительно по обеим осям.
    pub fn contains(&self, point: Vec2) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}

/// Последний закоммиченный трансформ entity для движка.
///
/// Пишется в конце update entity; движок-биндинг копирует в scene graph.
/// `hpr` = heading/pitch/roll в градусах.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct RenderPose {
    pub translation: Vec3,
    pub hpr: Vec3,
    pub visible: bool,
}
