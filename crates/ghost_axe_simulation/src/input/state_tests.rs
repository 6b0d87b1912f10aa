//! Tests for InputState.

#[cfg(test)]
mod tests {
    use crate::components::GhostId;
    use crate::input::gesture::Gesture;
    use crate::input::state::{Control, ContactActor, InputState};

    #[test]
    fn test_controls_explicit_set_is_idempotent() {
        let mut input = InputState::default();

        input.set_control(Control::Forward, true);
        input.set_control(Control::Forward, true); // повтор не ломает состояние
        assert!(input.is_pressed(Control::Forward));
        assert!(input.any_movement_pressed());

        input.set_control(Control::Forward, false);
        input.set_control(Control::Forward, false);
        assert!(!input.is_pressed(Control::Forward));
        assert!(!input.any_movement_pressed());
    }

    #[test]
    fn test_exit_and_attack_are_not_movement() {
        let mut input = InputState::default();
        input.set_control(Control::Exit, true);
        input.set_control(Control::Attack, true);
        assert!(!input.any_movement_pressed());
    }

    #[test]
    fn test_control_names() {
        assert_eq!(Control::from_name("strafeLeft"), Some(Control::StrafeLeft));
        assert_eq!(Control::from_name("attack"), Some(Control::Attack));
        assert_eq!(Control::from_name("jump"), None);
        for control in Control::ALL {
            assert_eq!(Control::from_name(control.name()), Some(control));
        }
    }

    #[test]
    fn test_gesture_is_level_not_edge() {
        let mut input = InputState::default();

        input.apply_gesture(Gesture::Swing);
        assert!(input.is_pressed(Control::Attack));
        input.apply_gesture(Gesture::Swing);
        assert!(input.is_pressed(Control::Attack));

        input.apply_gesture(Gesture::Rest);
        assert!(!input.is_pressed(Control::Attack));
    }

    #[test]
    fn test_weapon_contact_pair_restores_aggregate() {
        let mut input = InputState::default();
        let ghost = GhostId(1);

        assert!(input.on_contact_start(ContactActor::Weapon, ghost));
        assert!(input.weapon_contact(ghost));
        assert!(input.any_weapon_hit());

        assert!(input.on_contact_end(ContactActor::Weapon, ghost));
        assert!(!input.weapon_contact(ghost));
        assert!(!input.any_weapon_hit());
    }

    #[test]
    fn test_repeated_contact_events_do_not_desync() {
        let mut input = InputState::default();
        let ghost = GhostId(0);

        input.on_contact_start(ContactActor::Weapon, ghost);
        assert!(!input.on_contact_start(ContactActor::Weapon, ghost)); // дубль
        assert!(input.any_weapon_hit());

        input.on_contact_end(ContactActor::Weapon, ghost);
        assert!(!input.on_contact_end(ContactActor::Weapon, ghost)); // дубль
        assert!(!input.any_weapon_hit());
        assert!(!input.weapon_contact(ghost));
    }

    #[test]
    fn test_end_without_start_is_noop() {
        let mut input = InputState::default();
        assert!(!input.on_contact_end(ContactActor::Weapon, GhostId(7)));
        assert!(!input.on_contact_end(ContactActor::Player, GhostId(7)));
        assert!(!input.any_weapon_hit());
    }

    /// Агрегат совпадает с «хоть один флаг в массиве»
    fn assert_aggregate_matches(input: &InputState, ids: &[GhostId]) {
        let any = ids.iter().any(|ghost| input.weapon_contact(*ghost));
        assert_eq!(input.any_weapon_hit(), any, "aggregate out of sync with contacts");
    }

    #[test]
    fn test_overlapping_weapon_contacts_keep_aggregate_in_sync() {
        let mut input = InputState::default();
        let (a, b) = (GhostId(0), GhostId(3));
        let ids = [a, b];

        let steps = [
            (true, a),
            (true, b),
            (false, a),
            (true, a),
            (false, b),
            (false, a),
            (true, b),
            (false, b),
        ];
        for (start, ghost) in steps {
            if start {
                input.on_contact_start(ContactActor::Weapon, ghost);
            } else {
                input.on_contact_end(ContactActor::Weapon, ghost);
            }
            assert_aggregate_matches(&input, &ids);
        }
        assert!(!input.any_weapon_hit());
    }

    #[test]
    fn test_two_ghosts_on_blade_hold_aggregate_until_both_leave() {
        let mut input = InputState::default();

        input.on_contact_start(ContactActor::Weapon, GhostId(0));
        input.on_contact_start(ContactActor::Weapon, GhostId(1));
        assert!(input.any_weapon_hit());

        input.on_contact_end(ContactActor::Weapon, GhostId(0));
        assert!(input.any_weapon_hit());

        input.on_contact_end(ContactActor::Weapon, GhostId(1));
        assert!(!input.any_weapon_hit());
    }

    #[test]
    fn test_release_of_touching_ghost_updates_aggregate() {
        let mut input = InputState::default();
        input.on_contact_start(ContactActor::Weapon, GhostId(2));
        input.on_contact_start(ContactActor::Weapon, GhostId(5));

        input.release_ghost(GhostId(2));
        assert!(input.any_weapon_hit()); // 5 всё ещё у лезвия

        input.release_ghost(GhostId(5));
        assert!(!input.any_weapon_hit());
    }

    #[test]
    fn test_resync_keeps_live_contact() {
        let mut input = InputState::default();
        input.on_contact_start(ContactActor::Weapon, GhostId(1));

        input.resync_weapon_hit();
        assert!(input.any_weapon_hit());

        input.on_contact_end(ContactActor::Weapon, GhostId(1));
        input.resync_weapon_hit();
        assert!(!input.any_weapon_hit());
    }

    #[test]
    fn test_player_contact_does_not_touch_aggregate() {
        let mut input = InputState::default();
        let ghost = GhostId(4);

        assert!(input.on_contact_start(ContactActor::Player, ghost));
        assert!(input.is_touching_player(ghost));
        assert!(!input.any_weapon_hit());

        assert!(input.on_contact_end(ContactActor::Player, ghost));
        assert!(!input.is_touching_player(ghost));
    }

    #[test]
    fn test_proximity_last_write_wins() {
        let mut input = InputState::default();

        input.on_proximity(GhostId(0), GhostId(2));
        input.on_proximity(GhostId(0), GhostId(5));
        assert_eq!(input.avoidance_target(GhostId(0)), Some(GhostId(5)));
        assert!(input.player_contact(GhostId(5)).is_some());

        // Сам с собой: игнорируем
        input.on_proximity(GhostId(1), GhostId(1));
        assert_eq!(input.avoidance_target(GhostId(1)), None);
    }

    #[test]
    fn test_release_ghost_clears_owned_entries_only() {
        let mut input = InputState::default();
        input.on_contact_start(ContactActor::Player, GhostId(1));
        input.on_contact_start(ContactActor::Weapon, GhostId(1));
        input.on_proximity(GhostId(1), GhostId(0));
        input.on_proximity(GhostId(0), GhostId(1));

        input.release_ghost(GhostId(1));

        assert!(!input.is_touching_player(GhostId(1)));
        assert!(!input.weapon_contact(GhostId(1)));
        assert_eq!(input.avoidance_target(GhostId(1)), None);
        // Чужая ссылка на умершего остаётся (читатель валидирует)
        assert_eq!(input.avoidance_target(GhostId(0)), Some(GhostId(1)));
    }

    #[test]
    fn test_out_of_range_queries_are_safe() {
        let input = InputState::default();
        assert!(!input.weapon_contact(GhostId(99)));
        assert!(input.player_contact(GhostId(99)).is_none());
        assert_eq!(input.avoidance_target(GhostId(99)), None);
    }
}
