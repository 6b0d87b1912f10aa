//! Player module: first-person контроллер и его per-frame update
//!
//! Игрок = один entity с `Player` + `Weapon` (Required Components).
//! Позиция/ориентация уходят в движок через `RenderPose`,
//! offset топора: через `Weapon::offset`.

use bevy::prelude::*;

pub mod movement;
pub mod systems;

pub use movement::{
    apply_look, heading_step, integrate_speed, step_position, ACCELERATION, DECELERATION, DIRECT_SPEED_CAP,
    GESTURE_PAN_RATE, GESTURE_SPEED_CAP, SECONDARY_SPEED_FACTOR,
};
pub use systems::update_player;

use crate::components::Player;
use crate::SimulationSet;

/// Заспавнить игрока в стартовой точке (Weapon/RenderPose добавятся через #[require])
pub fn spawn_player(commands: &mut Commands) -> Entity {
    let player = Player::default();
    let pose = player.render_pose();
    commands.spawn((player, pose)).id()
}

/// Player Plugin
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, update_player.in_set(SimulationSet::Player));
    }
}
