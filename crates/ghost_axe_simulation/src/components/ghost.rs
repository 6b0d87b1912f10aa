//! Ghost компоненты: идентичность, статы волны, lifecycle

use bevy::prelude::*;

use crate::components::RenderPose;

/// Призраки спавнятся группами по 4, с интервалом между группами.
pub const GHOST_GROUP_SIZE: usize = 4;

/// Интервал между группами одной волны (секунды)
pub const GHOST_GROUP_INTERVAL: f64 = 5.0;

/// Урон от одного удара топором
pub const AXE_DAMAGE: i32 = 5;

/// Базовая скорость призрака (units/sec)
pub const GHOST_BASE_SPEED: f32 = 6.5;

/// Высота, на которой рендерится призрак
pub const GHOST_RENDER_HEIGHT: f32 = 2.0;

/// Углы арены, из которых выходят призраки (по `batch_slot % 4`)
pub const GHOST_SPAWN_POINTS: [Vec2; 4] = [
    Vec2::new(-57.0, 34.0),
    Vec2::new(-57.0, -26.0),
    Vec2::new(45.0, 34.0),
    Vec2::new(45.0, -26.0),
];

/// Стабильная идентичность призрака: индекс в `GhostRoster`.
///
/// Никогда не переиспользуется в пределах сессии.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct GhostId(pub usize);

impl GhostId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for GhostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ghost#{}", self.0)
    }
}

/// dormant → active → destroyed (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum GhostLifecycle {
    /// Заспавнен, но ждёт stagger-задержку (скрыт, не обновляется)
    #[default]
    Dormant,
    Active,
    /// Слот ростера освобождён, entity деспавнится
    Destroyed,
}

/// Статы призрака для волны
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostStats {
    pub health: i32,
    pub speed: f32,
}

impl GhostStats {
    pub fn for_round(round: u32) -> Self {
        Self {
            health: round as i32 * 2 + 10,
            speed: GHOST_BASE_SPEED,
        }
    }
}

/// Призрак
///
/// Инвариант: `health <= max_health`, health только убывает.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(RenderPose)]
pub struct Ghost {
    pub id: GhostId,
    /// Индекс внутри волны (определяет группу и угол спавна)
    pub batch_slot: usize,
    pub position: Vec2,
    /// Heading в градусах (лицом к игроку)
    pub heading: f32,
    pub health: i32,
    /// Здоровье на момент спавна (для инварианта)
    pub max_health: i32,
    pub speed: f32,
    /// Debounce: сбрасывается только после окончания контакта с топором
    pub hit_allowed: bool,
    pub lifecycle: GhostLifecycle,
}

impl Ghost {
    pub fn new(id: GhostId, batch_slot: usize, round: u32) -> Self {
        let stats = GhostStats::for_round(round);

        Self {
            id,
            batch_slot,
            position: GHOST_SPAWN_POINTS[batch_slot % GHOST_SPAWN_POINTS.len()],
            heading: 0.0,
            health: stats.health,
            max_health: stats.health,
            speed: stats.speed,
            hit_allowed: true,
            lifecycle: GhostLifecycle::Dormant,
        }
    }

    /// Stagger: `(batch_slot / GROUP_SIZE) * 5` секунд от старта волны.
    pub fn activation_delay(&self) -> f64 {
        (self.batch_slot / GHOST_GROUP_SIZE) as f64 * GHOST_GROUP_INTERVAL
    }

    /// Dormant → Active, если с начала волны прошло достаточно времени.
    /// Возвращает true только в момент перехода.
    pub fn try_activate(&mut self, round_elapsed: f64) -> bool {
        if self.lifecycle == GhostLifecycle::Dormant && round_elapsed >= self.activation_delay() {
            self.lifecycle = GhostLifecycle::Active;
            return true;
        }
        false
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == GhostLifecycle::Active
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn render_pose(&self) -> RenderPose {
        RenderPose {
            translation: self.position.extend(GHOST_RENDER_HEIGHT),
            hpr: Vec3::new(self.heading, 0.0, 0.0),
            visible: self.lifecycle == GhostLifecycle::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_one_health() {
        let ghost = Ghost::new(GhostId(0), 0, 1);
        assert_eq!(ghost.health, 12);
        assert_eq!(ghost.max_health, 12);
        assert_eq!(ghost.speed, GHOST_BASE_SPEED);
        assert!(ghost.hit_allowed);
        assert_eq!(ghost.lifecycle, GhostLifecycle::Dormant);
    }

    #[test]
    fn test_stats_scale_with_round() {
        assert_eq!(GhostStats::for_round(3).health, 16);
        assert_eq!(GhostStats::for_round(10).health, 30);
    }

    #[test]
    fn test_spawn_corner_by_slot() {
        assert_eq!(Ghost::new(GhostId(0), 0, 1).position, GHOST_SPAWN_POINTS[0]);
        assert_eq!(Ghost::new(GhostId(5), 5, 1).position, GHOST_SPAWN_POINTS[1]);
        assert_eq!(Ghost::new(GhostId(7), 7, 1).position, GHOST_SPAWN_POINTS[3]);
    }

    #[test]
    fn test_activation_stagger() {
        let mut ghost = Ghost::new(GhostId(5), 5, 1);
        assert_eq!(ghost.activation_delay(), 5.0);

        assert!(!ghost.try_activate(4.99));
        assert_eq!(ghost.lifecycle, GhostLifecycle::Dormant);

        assert!(ghost.try_activate(5.0));
        assert!(ghost.is_active());

        // Повторная активация: не переход
        assert!(!ghost.try_activate(6.0));
    }

    #[test]
    fn test_first_group_activates_immediately() {
        let mut ghost = Ghost::new(GhostId(3), 3, 1);
        assert_eq!(ghost.activation_delay(), 0.0);
        assert!(ghost.try_activate(0.0));
    }

    #[test]
    fn test_render_pose_hidden_while_dormant() {
        let ghost = Ghost::new(GhostId(0), 0, 1);
        let pose = ghost.render_pose();
        assert!(!pose.visible);
        assert_eq!(pose.translation.z, GHOST_RENDER_HEIGHT);
    }
}
