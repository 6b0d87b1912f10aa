//! Ghost update: активация → движение → удар топора → смерть → RenderPose
//!
//! Призраки обновляются последовательно в порядке id: сосед, сдвинутый
//! раньше в этом кадре, виден следующему уже на новой позиции.

use bevy::prelude::*;

use crate::combat::{Dead, GhostDied, GhostHit, Weapon};
use crate::components::{Ghost, GhostLifecycle, Player, RenderPose};
use crate::ghost::behaviour::{resolve_weapon_hit, steer};
use crate::ghost::GhostRoster;
use crate::input::InputState;
use crate::round::{RoundState, SessionStats};

/// Система: per-frame update всех живых призраков.
///
/// Без живого игрока призраки замирают (экран смерти).
pub fn update_ghosts(
    mut commands: Commands,
    time: Res<Time>,
    rounds: Res<RoundState>,
    mut roster: ResMut<GhostRoster>,
    mut input: ResMut<InputState>,
    mut stats: ResMut<SessionStats>,
    players: Query<(&Player, &Weapon), Without<Dead>>,
    mut ghosts: Query<(&mut Ghost, &mut RenderPose)>,
    mut hit_events: EventWriter<GhostHit>,
    mut died_events: EventWriter<GhostDied>,
) {
    let Ok((player, weapon)) = players.single() else {
        return;
    };

    let dt = time.delta_secs();
    let round_elapsed = rounds.round_elapsed(time.elapsed_secs_f64());
    let player_position = player.planar_position();
    let weapon_swinging = weapon.is_swinging();

    let live: Vec<_> = roster.live().collect();

    for (id, entity) in live {
        // Avoidance target может указывать на уничтоженного: чистим ссылку
        let avoid_from = match input.avoidance_target(id) {
            Some(target) => {
                let position = roster
                    .get(target)
                    .and_then(|target_entity| ghosts.get(target_entity).ok())
                    .map(|(other, _)| other.position);
                if position.is_none() {
                    input.clear_avoidance_target(id);
                }
                position
            }
            None => None,
        };

        let Ok((mut ghost, mut pose)) = ghosts.get_mut(entity) else {
            continue;
        };

        match ghost.lifecycle {
            GhostLifecycle::Dormant => {
                if ghost.try_activate(round_elapsed) {
                    crate::logger::log(&format!("{} activated at {:.2}s", id, round_elapsed));
                }
                *pose = ghost.render_pose();
                continue;
            }
            GhostLifecycle::Destroyed => continue,
            GhostLifecycle::Active => {}
        }

        steer(&mut ghost, player_position, avoid_from, input.is_touching_player(id), dt);

        if resolve_weapon_hit(&mut ghost, input.weapon_contact(id), weapon_swinging) {
            crate::logger::log(&format!("{} hit by axe, health {}", id, ghost.health));
            hit_events.write(GhostHit {
                ghost: id,
                remaining_health: ghost.health,
            });
        }

        if ghost.is_dead() {
            stats.kills += 1;
            ghost.lifecycle = GhostLifecycle::Destroyed;
            roster.release(id);
            input.release_ghost(id);
            commands.entity(entity).despawn();

            crate::logger::log_info(&format!("{} destroyed (kills: {})", id, stats.kills));
            died_events.write(GhostDied {
                ghost: id,
                kills: stats.kills,
            });
            continue;
        }

        *pose = ghost.render_pose();
    }
}
