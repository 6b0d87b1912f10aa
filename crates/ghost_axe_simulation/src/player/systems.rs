//! Player update за кадр
//!
//! Порядок фиксирован:
//! speed → movement → look → check_damage → weapon → RenderPose
//!
//! Топор тикается ПОСЛЕ проверки урона: при смерти он в этом кадре
//! не обновляется, а entity получает маркер `Dead`.

use bevy::prelude::*;

use crate::combat::{check_damage, Dead, OverlayChanged, PlayerDied, PlayerHit, PlayerRecovered, Weapon};
use crate::components::{ArenaBounds, Player, RenderPose};
use crate::input::{InputState, PointerDelta};
use crate::player::movement::{apply_look, integrate_speed, step_position};
use crate::round::{RoundState, SessionStats};
use crate::settings::Settings;

/// Feedback writers игрока (один SystemParam вместо пяти аргументов)
#[derive(bevy::ecs::system::SystemParam)]
pub struct PlayerFeedback<'w> {
    hits: EventWriter<'w, PlayerHit>,
    recovered: EventWriter<'w, PlayerRecovered>,
    died: EventWriter<'w, PlayerDied>,
    overlay: EventWriter<'w, OverlayChanged>,
}

/// Система: per-frame update живого игрока.
pub fn update_player(
    mut commands: Commands,
    time: Res<Time>,
    settings: Res<Settings>,
    bounds: Res<ArenaBounds>,
    rounds: Res<RoundState>,
    stats: Res<SessionStats>,
    mut input: ResMut<InputState>,
    mut pointer: ResMut<PointerDelta>,
    mut players: Query<(Entity, &mut Player, &mut Weapon, &mut RenderPose), Without<Dead>>,
    mut feedback: PlayerFeedback,
) {
    // Delta указателя потребляется каждый кадр, даже без живого игрока
    let pointer_delta = pointer.take();

    let Ok((entity, mut player, mut weapon, mut pose)) = players.single_mut() else {
        return;
    };

    let dt = time.delta_secs();
    let now = time.elapsed_secs_f64();
    let mode = settings.input_mode;

    player.speed = integrate_speed(player.speed, &input, mode, dt);
    step_position(&mut player, &input, mode, &bounds, dt);
    apply_look(&mut player, &input, &settings, pointer_delta, dt);

    let report = check_damage(&mut player, &mut input, now);

    for ghost in &report.hits {
        crate::logger::log(&format!("Player hit by {}, health {}", ghost, player.health));
        feedback.hits.write(PlayerHit {
            by: *ghost,
            health: player.health,
        });
    }
    if let Some(overlay) = report.overlay_changed {
        feedback.overlay.write(OverlayChanged { overlay });
    }

    if report.died {
        crate::logger::log_info(&format!(
            "Player died in round {} with {} kills",
            rounds.round, stats.kills
        ));
        feedback.died.write(PlayerDied {
            kills: stats.kills,
            round: rounds.round,
        });
        commands.entity(entity).insert(Dead);
        *pose = player.render_pose();
        return;
    }

    if report.recovered {
        crate::logger::log("Player fully regenerated");
        feedback.recovered.write(PlayerRecovered);
    }

    if let Some(phase) = weapon.tick(&mut input, dt) {
        crate::logger::log(&format!("Axe swing phase: {:?}", phase));
    }

    *pose = player.render_pose();
}
