//! Input systems: события движка → InputState
//!
//! Выполняются первыми в кадре, поэтому к моменту update'ов entity
//! InputState отражает все коллбеки, пришедшие с прошлого кадра.

use bevy::prelude::*;

use crate::ghost::GhostRoster;
use crate::input::events::{
    ContactEvent, ContactPhase, ControlEvent, ExitRequested, PointerDelta, PointerMotion, ProximityEvent,
};
use crate::input::gesture::GestureFeed;
use crate::input::state::{Control, InputState};
use crate::settings::{InputMode, Settings};

/// Система: ControlEvent → InputState (+ edge-детект exit)
pub fn apply_control_events(
    mut events: EventReader<ControlEvent>,
    mut input: ResMut<InputState>,
    mut exit_events: EventWriter<ExitRequested>,
) {
    for event in events.read() {
        let was_pressed = input.is_pressed(event.control);
        input.set_control(event.control, event.pressed);

        if event.control == Control::Exit && event.pressed && !was_pressed {
            crate::logger::log_info("Exit requested");
            exit_events.write(ExitRequested);
        }
    }
}

/// Система: ContactEvent/ProximityEvent → InputState
///
/// События уничтоженных призраков отбрасываются: их подписки сняты
/// вместе со слотом ростера.
pub fn apply_contact_events(
    mut contacts: EventReader<ContactEvent>,
    mut proximity: EventReader<ProximityEvent>,
    roster: Res<GhostRoster>,
    mut input: ResMut<InputState>,
) {
    for event in contacts.read() {
        if !roster.is_live(event.ghost) {
            crate::logger::log(&format!(
                "Dropped {:?} contact {:?} for released {}",
                event.actor, event.phase, event.ghost
            ));
            continue;
        }

        match event.phase {
            ContactPhase::Started => input.on_contact_start(event.actor, event.ghost),
            ContactPhase::Ended => input.on_contact_end(event.actor, event.ghost),
        };
    }

    for event in proximity.read() {
        if !roster.is_live(event.ghost) {
            continue;
        }
        // `other` может быть уже мёртв: валидирует читатель
        input.on_proximity(event.ghost, event.other);
    }
}

/// Система: PointerMotion → PointerDelta (накопление за кадр)
pub fn accumulate_pointer_motion(
    mut events: EventReader<PointerMotion>,
    mut pointer: ResMut<PointerDelta>,
) {
    for event in events.read() {
        pointer.0 += event.delta;
    }
}

/// Система: опрос устройства жестов (только gesture mode).
///
/// Ровно одна запись в `attack` за кадр, без блокировки.
pub fn poll_gesture_source(
    settings: Res<Settings>,
    feed: Option<NonSendMut<GestureFeed>>,
    mut input: ResMut<InputState>,
) {
    if settings.input_mode != InputMode::Gesture {
        return;
    }
    let Some(mut feed) = feed else {
        return;
    };

    if let Some(gesture) = feed.poll() {
        input.apply_gesture(gesture);
    }
}
