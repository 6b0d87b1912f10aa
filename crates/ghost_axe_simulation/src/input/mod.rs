//! Input/Event state module
//!
//! ```text
//! Движок (клавиатура, мышь, коллизии)      Акселерометр (serial)
//!     ↓ ControlEvent / ContactEvent / ...     ↓ GestureFeed (NonSend)
//! input::systems (начало кадра)
//!     ↓
//! InputState (Resource) ← читают/пишут player, weapon, ghost update'ы
//! ```

use bevy::prelude::*;

pub mod events;
pub mod gesture;
pub mod state;
pub mod systems;

#[cfg(test)]
mod state_tests;

pub use events::*;
pub use gesture::{ChannelGestureSource, Gesture, GestureFeed, GestureSource, SerialLineBuffer};
pub use state::{ContactActor, Control, InputState, PlayerContact};

use crate::SimulationSet;

/// Input Plugin
///
/// Порядок:
/// 1. apply_control_events: контролы + exit edge
/// 2. apply_contact_events: ledger коллизий, avoidance targets
/// 3. accumulate_pointer_motion: mouse look delta
/// 4. poll_gesture_source: акселерометр → attack
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>()
            .init_resource::<PointerDelta>()
            .add_event::<ControlEvent>()
            .add_event::<ContactEvent>()
            .add_event::<ProximityEvent>()
            .add_event::<PointerMotion>()
            .add_event::<ExitRequested>();

        app.add_systems(
            Update,
            (
                systems::apply_control_events,
                systems::apply_contact_events,
                systems::accumulate_pointer_motion,
                systems::poll_gesture_source,
            )
                .chain()
                .in_set(SimulationSet::Input),
        );
    }
}
