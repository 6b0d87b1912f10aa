//! Движение игрока: скорость с инерцией, шаги по heading, mouse look / pan
//!
//! Heading в градусах, рост heading = поворот влево. Шаг вдоль heading θ:
//! `x -= d * sin θ`, `y += d * cos θ` (θ = 0 смотрит в +Y).

use bevy::prelude::*;

use crate::components::{ArenaBounds, Player};
use crate::input::{Control, InputState};
use crate::settings::{InputMode, Settings};

pub const ACCELERATION: f32 = 15.0;
pub const DECELERATION: f32 = 17.0;

/// Порог скорости, выше которого не ускоряемся (direct mode)
pub const DIRECT_SPEED_CAP: f32 = 14.0;

/// То же для gesture mode (разгон только forward/back)
pub const GESTURE_SPEED_CAP: f32 = 10.0;

/// Доля скорости для back/strafe и инерционного доката
pub const SECONDARY_SPEED_FACTOR: f32 = 0.4;

/// Поворот камеры strafe-клавишами в gesture mode (градусы/сек)
pub const GESTURE_PAN_RATE: f32 = 180.0;

/// Разгон/торможение за кадр. Скорость никогда не уходит в минус.
pub fn integrate_speed(speed: f32, input: &InputState, mode: InputMode, dt: f32) -> f32 {
    let (driving, cap) = match mode {
        InputMode::Direct => (input.any_movement_pressed(), DIRECT_SPEED_CAP),
        InputMode::Gesture => (
            input.is_pressed(Control::Forward) || input.is_pressed(Control::Back),
            GESTURE_SPEED_CAP,
        ),
    };

    let speed = if driving && speed < cap {
        speed + ACCELERATION * dt
    } else if !driving && speed > 0.0 {
        speed - DECELERATION * dt
    } else {
        speed
    };

    speed.max(0.0)
}

/// Смещение на `distance` вдоль направления `heading` (радианы).
pub fn heading_step(heading: f32, distance: f32) -> Vec2 {
    Vec2::new(-distance * heading.sin(), distance * heading.cos())
}

/// Кандидат принимается, только если остаётся внутри арены.
fn try_move(player: &mut Player, bounds: &ArenaBounds, heading: f32, distance: f32) -> bool {
    let candidate = player.planar_position() + heading_step(heading, distance);
    if !bounds.contains(candidate) {
        return false;
    }
    player.position.x = candidate.x;
    player.position.y = candidate.y;
    true
}

/// Направленный шаг по зажатой клавише; запоминает направление для доката.
fn move_along(player: &mut Player, bounds: &ArenaBounds, offset_deg: f32, distance: f32) {
    let heading = (player.heading + offset_deg).rem_euclid(360.0).to_radians();
    player.last_moving_heading = heading;
    try_move(player, bounds, heading, distance);
}

/// Перемещение за кадр по текущей скорости.
///
/// Каждый кандидат проверяется отдельно: отклонённый шаг оставляет
/// позицию как есть, остальные шаги кадра применяются.
pub fn step_position(player: &mut Player, input: &InputState, mode: InputMode, bounds: &ArenaBounds, dt: f32) {
    let full = player.speed * dt;
    let secondary = full * SECONDARY_SPEED_FACTOR;

    if input.is_pressed(Control::Forward) {
        move_along(player, bounds, 0.0, full);
    }
    if input.is_pressed(Control::Back) {
        move_along(player, bounds, 180.0, secondary);
    }
    if mode == InputMode::Direct {
        if input.is_pressed(Control::StrafeLeft) {
            move_along(player, bounds, 90.0, secondary);
        }
        if input.is_pressed(Control::StrafeRight) {
            move_along(player, bounds, -90.0, secondary);
        }
    }

    // Докат по инерции в последнем направлении
    if !input.any_movement_pressed() {
        let heading = player.last_moving_heading;
        try_move(player, bounds, heading, secondary);
    }
}

/// Ориентация камеры.
///
/// Direct: pointer delta × чувствительность (heading растёт влево).
/// Gesture: strafe-клавиши крутят камеру с фиксированной скоростью.
pub fn apply_look(player: &mut Player, input: &InputState, settings: &Settings, pointer: Vec2, dt: f32) {
    match settings.input_mode {
        InputMode::Direct => {
            player.heading += -pointer.x * settings.sensitivity_x * dt;
            player.pitch += pointer.y * settings.sensitivity_y * dt;
        }
        InputMode::Gesture => {
            if input.is_pressed(Control::StrafeLeft) {
                player.heading += GESTURE_PAN_RATE * dt;
            }
            if input.is_pressed(Control::StrafeRight) {
                player.heading -= GESTURE_PAN_RATE * dt;
            }
        }
    }
}
