//! Weapon (топор): анимация замаха как state machine
//!
//! Offset топора относительно камеры интерполируется:
//! Idle → Extending (вперёд до упора или до попадания) → Retracting → Idle.
//!
//! Коллизию топора с призраком считает движок; здесь только флаг
//! `InputState::any_weapon_hit`, который переводит замах в возврат.

use bevy::prelude::*;

use crate::input::{Control, InputState};

/// Поза покоя (offset от камеры)
pub const AXE_REST: Vec3 = Vec3::new(1.0, 0.4, -0.9);

/// Крайняя поза замаха
pub const AXE_EXTENDED: Vec3 = Vec3::new(0.5, 2.0, -0.5);

/// Скорости по осям (units/sec) при выносе топора вперёд
const EXTEND_RATE: Vec3 = Vec3::new(2.0, 5.0, 2.0);

/// Скорости по осям (units/sec) при возврате
const RETRACT_RATE: Vec3 = Vec3::new(2.0, 3.0, 2.0);

/// Фаза замаха
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum SwingPhase {
    #[default]
    Idle,
    Extending,
    Retracting,
}

/// Топор игрока.
///
/// Инвариант: `is_swinging() == (phase != Idle)`, флаг не хранится отдельно.
/// В полёте максимум один замах; нажатия во время замаха игнорируются.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    pub offset: Vec3,
    phase: SwingPhase,
    /// Состояние attack на прошлом тике (edge-detect)
    attack_was_pressed: bool,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            offset: AXE_REST,
            phase: SwingPhase::Idle,
            attack_was_pressed: false,
        }
    }
}

impl Weapon {
    pub fn phase(&self) -> SwingPhase {
        self.phase
    }

    pub fn is_swinging(&self) -> bool {
        self.phase != SwingPhase::Idle
    }

    /// Один тик анимации. Возвращает новую фазу, если она сменилась.
    pub fn tick(&mut self, input: &mut InputState, dt: f32) -> Option<SwingPhase> {
        let attack = input.is_pressed(Control::Attack);
        let newly_pressed = attack && !self.attack_was_pressed;
        self.attack_was_pressed = attack;

        let before = self.phase;

        if self.phase == SwingPhase::Idle && newly_pressed {
            self.phase = SwingPhase::Extending;
        }

        match self.phase {
            SwingPhase::Idle => {}
            SwingPhase::Extending => self.extend(input, dt),
            SwingPhase::Retracting => self.retract(input, dt),
        }

        (self.phase != before).then_some(self.phase)
    }

    fn extend(&mut self, input: &InputState, dt: f32) {
        // Попали: назад, но движение этого кадра всё равно применяется
        if input.any_weapon_hit() {
            self.phase = SwingPhase::Retracting;
        }

        let offset = &mut self.offset;
        if offset.y < AXE_EXTENDED.y {
            offset.y += EXTEND_RATE.y * dt;
        }
        if offset.x > AXE_EXTENDED.x {
            offset.x -= EXTEND_RATE.x * dt;
        }
        if offset.z < AXE_EXTENDED.z {
            offset.z += EXTEND_RATE.z * dt;
        }

        if offset.y >= AXE_EXTENDED.y && offset.x <= AXE_EXTENDED.x && offset.z >= AXE_EXTENDED.z {
            self.phase = SwingPhase::Retracting;
        }
    }

    fn retract(&mut self, input: &mut InputState, dt: f32) {
        let offset = &mut self.offset;
        if offset.y > AXE_REST.y {
            offset.y -= RETRACT_RATE.y * dt;
        }
        if offset.x < AXE_REST.x {
            offset.x += RETRACT_RATE.x * dt;
        }
        if offset.z > AXE_REST.z {
            offset.z -= RETRACT_RATE.z * dt;
        }

        if offset.x >= AXE_REST.x && offset.y <= AXE_REST.y && offset.z <= AXE_REST.z {
            self.offset = AXE_REST;
            self.phase = SwingPhase::Idle;
            input.resync_weapon_hit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::GhostId;
    use crate::input::ContactActor;

    const DT: f32 = 1.0 / 60.0;

    fn press(input: &mut InputState, pressed: bool) {
        input.set_control(Control::Attack, pressed);
    }

    /// Тикает до Idle, возвращает количество тиков
    fn run_to_idle(weapon: &mut Weapon, input: &mut InputState) -> usize {
        let mut ticks = 0;
        while weapon.is_swinging() {
            weapon.tick(input, DT);
            ticks += 1;
            assert!(ticks < 10_000, "swing never finished");
        }
        ticks
    }

    /// Тикает замах до Retracting; true, если топор дошёл до крайней позы
    fn reaches_extended(weapon: &mut Weapon, input: &mut InputState) -> bool {
        weapon.tick(input, DT);
        let mut ticks = 0;
        while weapon.phase() == SwingPhase::Extending {
            weapon.tick(input, DT);
            ticks += 1;
            assert!(ticks < 10_000, "swing never turned back");
        }
        weapon.offset.y >= AXE_EXTENDED.y
    }

    #[test]
    fn test_idle_without_press() {
        let mut weapon = Weapon::default();
        let mut input = InputState::default();

        assert_eq!(weapon.tick(&mut input, DT), None);
        assert_eq!(weapon.phase(), SwingPhase::Idle);
        assert_eq!(weapon.offset, AXE_REST);
    }

    #[test]
    fn test_press_starts_extending() {
        let mut weapon = Weapon::default();
        let mut input = InputState::default();
        press(&mut input, true);

        assert_eq!(weapon.tick(&mut input, DT), Some(SwingPhase::Extending));
        assert!(weapon.is_swinging());
        // Движение начинается в том же тике
        assert!(weapon.offset.y > AXE_REST.y);
    }

    #[test]
    fn test_full_cycle_returns_to_exact_rest() {
        let mut weapon = Weapon::default();
        let mut input = InputState::default();
        press(&mut input, true);
        weapon.tick(&mut input, DT);

        let mut saw_retracting = false;
        while weapon.is_swinging() {
            weapon.tick(&mut input, DT);
            saw_retracting |= weapon.phase() == SwingPhase::Retracting;
        }

        assert!(saw_retracting);
        assert_eq!(weapon.offset, AXE_REST);
        assert_eq!(weapon.phase(), SwingPhase::Idle);
    }

    #[test]
    fn test_held_attack_does_not_reswing() {
        let mut weapon = Weapon::default();
        let mut input = InputState::default();
        press(&mut input, true);
        weapon.tick(&mut input, DT);
        run_to_idle(&mut weapon, &mut input);

        // Кнопка всё ещё зажата: level, не edge
        for _ in 0..10 {
            weapon.tick(&mut input, DT);
        }
        assert!(!weapon.is_swinging());

        // Отпустили и нажали снова: новый замах
        press(&mut input, false);
        weapon.tick(&mut input, DT);
        press(&mut input, true);
        assert_eq!(weapon.tick(&mut input, DT), Some(SwingPhase::Extending));
    }

    #[test]
    fn test_presses_during_swing_are_ignored() {
        let mut weapon = Weapon::default();
        let mut input = InputState::default();
        press(&mut input, true);
        weapon.tick(&mut input, DT);

        // Пара release/press посреди замаха
        press(&mut input, false);
        weapon.tick(&mut input, DT);
        press(&mut input, true);
        weapon.tick(&mut input, DT);
        press(&mut input, false);

        let ticks = run_to_idle(&mut weapon, &mut input);
        assert!(ticks > 0);
        // Один цикл завершился, второго в очереди нет
        weapon.tick(&mut input, DT);
        assert!(!weapon.is_swinging());
    }

    #[test]
    fn test_hit_switches_to_retracting_early() {
        let mut weapon = Weapon::default();
        let mut input = InputState::default();
        press(&mut input, true);
        weapon.tick(&mut input, DT);
        assert_eq!(weapon.phase(), SwingPhase::Extending);

        input.on_contact_start(ContactActor::Weapon, GhostId(0));
        assert_eq!(weapon.tick(&mut input, DT), Some(SwingPhase::Retracting));
        assert!(weapon.offset.y < AXE_EXTENDED.y);
    }

    #[test]
    fn test_ghost_released_mid_contact_does_not_block_next_swing() {
        let mut weapon = Weapon::default();
        let mut input = InputState::default();
        press(&mut input, true);
        weapon.tick(&mut input, DT);

        // Призрак умер посреди контакта: contact-end не придёт
        input.on_contact_start(ContactActor::Weapon, GhostId(2));
        input.release_ghost(GhostId(2));
        assert!(!input.any_weapon_hit());

        run_to_idle(&mut weapon, &mut input);
        press(&mut input, false);
        weapon.tick(&mut input, DT);
        press(&mut input, true);
        assert!(reaches_extended(&mut weapon, &mut input));
    }

    #[test]
    fn test_contact_end_after_rest_does_not_leave_phantom_hit() {
        let mut weapon = Weapon::default();
        let mut input = InputState::default();
        press(&mut input, true);
        weapon.tick(&mut input, DT);

        // Попали; призрак всё ещё у лезвия, когда топор вернулся в покой
        input.on_contact_start(ContactActor::Weapon, GhostId(0));
        run_to_idle(&mut weapon, &mut input);
        assert!(input.any_weapon_hit());

        input.on_contact_end(ContactActor::Weapon, GhostId(0));
        assert!(!input.any_weapon_hit());

        press(&mut input, false);
        weapon.tick(&mut input, DT);
        press(&mut input, true);
        assert!(reaches_extended(&mut weapon, &mut input));
    }

    #[test]
    fn test_second_ghost_on_blade_still_retracts_swing() {
        let mut weapon = Weapon::default();
        let mut input = InputState::default();
        press(&mut input, true);
        weapon.tick(&mut input, DT);

        input.on_contact_start(ContactActor::Weapon, GhostId(0));
        input.on_contact_start(ContactActor::Weapon, GhostId(1));
        assert_eq!(weapon.tick(&mut input, DT), Some(SwingPhase::Retracting));
    }

    #[test]
    fn test_zero_dt_frame_does_not_move() {
        let mut weapon = Weapon::default();
        let mut input = InputState::default();
        press(&mut input, true);
        weapon.tick(&mut input, 0.0);

        assert_eq!(weapon.phase(), SwingPhase::Extending);
        assert_eq!(weapon.offset, AXE_REST);
    }
}
