//! Поведение активного призрака за один кадр (чистые функции)
//!
//! 1. steer: уступить дорогу соседу или идти к игроку, всегда лицом к игроку
//! 2. resolve_weapon_hit: урон от топора с debounce по окончанию контакта
//!
//! Системы только собирают входы (позиции, флаги контактов) и пишут события.

use bevy::prelude::*;

use crate::components::{Ghost, AXE_DAMAGE};

/// Квадрат дистанции, на которой призрак уступает соседу
pub const AVOIDANCE_RADIUS_SQ: f32 = 1.0;

/// Шаг отползания от соседа за кадр (НЕ масштабируется dt)
pub const AVOIDANCE_CRAWL: f32 = 0.01;

/// Какая ветка движения сработала
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    /// Отползли от avoidance target, seek пропущен
    Avoid,
    /// Шаг к игроку
    Seek,
    /// Держим игрока (контакт): стоим на месте
    Hold,
}

/// Heading (градусы) призрака, смотрящего из `from` на `to`.
pub fn facing_heading(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x).to_degrees() + 90.0
}

/// Движение призрака.
///
/// `avoid_from`: позиция валидного (живого) avoidance target.
/// Сравнение квадратов дистанций: нужен только порядок, не величина.
pub fn steer(ghost: &mut Ghost, player: Vec2, avoid_from: Option<Vec2>, touching_player: bool, dt: f32) -> Steering {
    ghost.heading = facing_heading(ghost.position, player);

    if let Some(target) = avoid_from {
        let dist_sq = ghost.position.distance_squared(target);
        let to_player_sq = ghost.position.distance_squared(player);
        let target_to_player_sq = target.distance_squared(player);

        if to_player_sq >= target_to_player_sq && dist_sq <= AVOIDANCE_RADIUS_SQ {
            // Угол от соседа (+π): при совпадении позиций atan2(0, 0) = 0, без NaN
            let toward = target - ghost.position;
            let away = toward.y.atan2(toward.x) + std::f32::consts::PI;
            ghost.position += Vec2::new(away.cos(), away.sin()) * AVOIDANCE_CRAWL;
            return Steering::Avoid;
        }
    }

    if touching_player {
        return Steering::Hold;
    }

    let bearing = (player - ghost.position).to_angle();
    ghost.position += Vec2::from_angle(bearing) * ghost.speed * dt;
    Steering::Seek
}

/// Удар топором. Возвращает true, если урон применён в этом кадре.
///
/// Повторный удар возможен только после того, как контакт закончился
/// хотя бы на один кадр (`hit_allowed` переарминг).
pub fn resolve_weapon_hit(ghost: &mut Ghost, weapon_contact: bool, weapon_swinging: bool) -> bool {
    if weapon_contact && ghost.hit_allowed && weapon_swinging {
        ghost.health -= AXE_DAMAGE;
        ghost.hit_allowed = false;
        return true;
    }

    if !weapon_contact && !ghost.hit_allowed {
        ghost.hit_allowed = true;
    }

    false
}
