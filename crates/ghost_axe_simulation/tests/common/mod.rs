//! Общие helper'ы интеграционных тестов: headless App + сборщик feedback событий

#![allow(dead_code)]

use bevy::prelude::*;
use ghost_axe_simulation::*;

/// Всё, что симуляция отдала движку (звук/UI)
#[derive(Resource, Default, Debug)]
pub struct Feedback {
    pub ghost_hits: Vec<GhostHit>,
    pub ghost_deaths: Vec<GhostDied>,
    pub player_hits: Vec<PlayerHit>,
    pub overlays: Vec<OverlayChanged>,
    pub recovered: usize,
    pub player_deaths: Vec<PlayerDied>,
    pub rounds: Vec<RoundStarted>,
    pub exits: usize,
}

#[allow(clippy::too_many_arguments)]
fn collect_feedback(
    mut feedback: ResMut<Feedback>,
    mut ghost_hits: EventReader<GhostHit>,
    mut ghost_deaths: EventReader<GhostDied>,
    mut player_hits: EventReader<PlayerHit>,
    mut overlays: EventReader<OverlayChanged>,
    mut recovered: EventReader<PlayerRecovered>,
    mut player_deaths: EventReader<PlayerDied>,
    mut rounds: EventReader<RoundStarted>,
    mut exits: EventReader<ExitRequested>,
) {
    feedback.ghost_hits.extend(ghost_hits.read().copied());
    feedback.ghost_deaths.extend(ghost_deaths.read().copied());
    feedback.player_hits.extend(player_hits.read().copied());
    feedback.overlays.extend(overlays.read().copied());
    feedback.recovered += recovered.read().count();
    feedback.player_deaths.extend(player_deaths.read().copied());
    feedback.rounds.extend(rounds.read().copied());
    feedback.exits += exits.read().count();
}

/// Headless арена без бота: события шлёт сам тест.
///
/// После возврата уже прошёл первый кадр (Startup: игрок + волна 1, dt = 0).
pub fn arena_app() -> App {
    let mut app = create_headless_app(7);
    app.init_resource::<Feedback>().add_systems(Last, collect_feedback);
    app.update();
    app
}

pub fn step(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Кадров на `seconds` симуляции (с запасом в один кадр)
pub fn frames_for(seconds: f64) -> usize {
    (seconds / HEADLESS_FRAME.as_secs_f64()).ceil() as usize + 1
}

pub fn now(app: &App) -> f64 {
    app.world().resource::<Time>().elapsed_secs_f64()
}

pub fn feedback(app: &App) -> &Feedback {
    app.world().resource::<Feedback>()
}

pub fn player(app: &mut App) -> Player {
    let world = app.world_mut();
    world
        .query::<&Player>()
        .single(world)
        .expect("exactly one player")
        .clone()
}

pub fn player_entity(app: &mut App) -> Entity {
    let world = app.world_mut();
    world
        .query_filtered::<Entity, With<Player>>()
        .single(world)
        .expect("exactly one player")
}

pub fn ghost(app: &App, id: GhostId) -> Option<Ghost> {
    let entity = app.world().resource::<GhostRoster>().get(id)?;
    app.world().get::<Ghost>(entity).cloned()
}

pub fn ghost_mut(app: &mut App, id: GhostId) -> Mut<'_, Ghost> {
    let entity = app
        .world()
        .resource::<GhostRoster>()
        .get(id)
        .expect("ghost is live");
    app.world_mut().get_mut::<Ghost>(entity).expect("ghost component")
}

pub fn input(app: &App) -> &InputState {
    app.world().resource::<InputState>()
}

pub fn send<E: Event>(app: &mut App, event: E) {
    app.world_mut().send_event(event);
}

pub fn press(app: &mut App, control: Control, pressed: bool) {
    send(app, ControlEvent { control, pressed });
}

/// Добить призрака: health в ноль, смерть обработает следующий кадр
pub fn kill(app: &mut App, id: GhostId) {
    ghost_mut(app, id).health = 0;
}
