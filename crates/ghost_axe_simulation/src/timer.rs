//! CooldownTimer: poll-based countdown/stopwatch
//!
//! Таймеры никогда не блокируют: владелец опрашивает `remaining`/`elapsed`
//! относительно текущего времени симуляции (`Time::elapsed_secs_f64`).
//! Используется для кулдауна ударов призраков, регенерации игрока и
//! stagger-задержки спавна волны.

use bevy::prelude::*;

/// Состояние таймера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum TimerMode {
    /// Не запущен (remaining/elapsed не имеют смысла)
    #[default]
    Idle,
    /// Идёт отсчёт до `expiry`
    Running,
}

/// Монотонный countdown/elapsed таймер.
///
/// Инвариант: `start <= expiry` пока `mode == Running`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct CooldownTimer {
    mode: TimerMode,
    /// Абсолютное время старта (секунды симуляции)
    start: f64,
    /// Абсолютное время истечения (секунды симуляции)
    expiry: f64,
}

impl CooldownTimer {
    /// Запустить (или перезапустить) отсчёт на `duration` секунд от `now`.
    pub fn arm(&mut self, now: f64, duration: f64) {
        self.mode = TimerMode::Running;
        self.start = now;
        self.expiry = now + duration;
    }

    /// Stopwatch-режим: запуск без длительности, читается через `elapsed`.
    pub fn start(&mut self, now: f64) {
        self.arm(now, 0.0);
    }

    /// Вернуть в Idle.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_idle(&self) -> bool {
        self.mode == TimerMode::Idle
    }

    pub fn is_running(&self) -> bool {
        self.mode == TimerMode::Running
    }

    /// Время до истечения. Отрицательное значение = истёк.
    ///
    /// Для Idle таймера возвращает `0.0` (не истёк и не идёт).
    pub fn remaining(&self, now: f64) -> f64 {
        match self.mode {
            TimerMode::Idle => 0.0,
            TimerMode::Running => self.expiry - now,
        }
    }

    /// Время с момента последнего `arm`/`start`. Для Idle: `0.0`.
    pub fn elapsed(&self, now: f64) -> f64 {
        match self.mode {
            TimerMode::Idle => 0.0,
            TimerMode::Running => now - self.start,
        }
    }

    /// Running и `remaining < 0` (строго).
    pub fn is_expired(&self, now: f64) -> bool {
        self.is_running() && self.remaining(now) < 0.0
    }
}
