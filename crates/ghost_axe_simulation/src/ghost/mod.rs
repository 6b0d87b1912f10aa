//! Ghost module: ростер идентичностей и per-frame поведение призраков
//!
//! ```text
//! RoundState (stagger clock) ─┐
//! InputState (контакты, avoidance) ─┼→ update_ghosts → Ghost/RenderPose
//! Player + Weapon ─┘                    ↓
//!                                 GhostHit / GhostDied, GhostRoster tombstone
//! ```

use bevy::prelude::*;

pub mod behaviour;
pub mod roster;
pub mod systems;


pub use behaviour::{facing_heading, resolve_weapon_hit, steer, Steering, AVOIDANCE_CRAWL, AVOIDANCE_RADIUS_SQ};
pub use roster::GhostRoster;
pub use systems::update_ghosts;

use crate::SimulationSet;

/// Ghost Plugin
pub struct GhostPlugin;

impl Plugin for GhostPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GhostRoster>()
            .add_systems(Update, update_ghosts.in_set(SimulationSet::Ghosts));
    }
}
