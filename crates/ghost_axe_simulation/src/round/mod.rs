//! Round module: волны призраков, счётчики сессии, старт/сброс сессии
//!
//! Волна N = `GHOST_GROUP_SIZE * N` призраков со здоровьем `N * 2 + 10`.
//! Группы по 4 выходят каждые 5 секунд от старта волны (stagger clock).
//! Когда вся волна уничтожена: следующая, с новыми id.

use bevy::prelude::*;

use crate::components::{Ghost, GhostId, Player, GHOST_GROUP_SIZE};
use crate::ghost::GhostRoster;
use crate::input::{InputState, PointerDelta};
use crate::timer::CooldownTimer;
use crate::SimulationSet;

/// Текущая волна
#[derive(Resource, Debug, Clone, Default)]
pub struct RoundState {
    /// 1-based; 0 = сессия ещё не стартовала
    pub round: u32,
    /// Stopwatch от старта волны (читается через `elapsed`)
    pub clock: CooldownTimer,
    pub first_id: GhostId,
    pub batch_size: usize,
}

impl RoundState {
    pub fn batch_size_for(round: u32) -> usize {
        GHOST_GROUP_SIZE * round as usize
    }

    /// Секунды с начала текущей волны
    pub fn round_elapsed(&self, now: f64) -> f64 {
        self.clock.elapsed(now)
    }

    pub fn batch_ids(&self) -> impl Iterator<Item = GhostId> {
        let first = self.first_id.index();
        (first..first + self.batch_size).map(GhostId)
    }

    /// Все призраки волны уничтожены
    pub fn is_cleared(&self, roster: &GhostRoster) -> bool {
        self.round > 0 && self.batch_ids().all(|id| !roster.is_live(id))
    }
}

/// Счётчики сессии (читаются UI снаружи)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub kills: u32,
}

/// Началась новая волна
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundStarted {
    pub round: u32,
    pub batch_size: usize,
}

/// Заспавнить волну `round`: выделить id в ростере, завести слоты InputState,
/// перезапустить stagger clock.
pub fn spawn_round_batch(
    round: u32,
    now: f64,
    roster: &mut GhostRoster,
    rounds: &mut RoundState,
    input: &mut InputState,
    mut spawn: impl FnMut(Ghost) -> Entity,
) -> RoundStarted {
    let batch_size = RoundState::batch_size_for(round);
    let first_id = GhostId(roster.allocated());

    for batch_slot in 0..batch_size {
        roster.allocate(|id| spawn(Ghost::new(id, batch_slot, round)));
    }
    input.ensure_capacity(roster.allocated());

    rounds.round = round;
    rounds.first_id = first_id;
    rounds.batch_size = batch_size;
    rounds.clock.start(now);

    crate::logger::log_info(&format!(
        "Round {} started: {} ghosts ({}..{})",
        round,
        batch_size,
        first_id,
        roster.allocated()
    ));

    RoundStarted { round, batch_size }
}

/// Startup система: игрок + первая волна
pub fn start_session(
    mut commands: Commands,
    time: Res<Time>,
    mut roster: ResMut<GhostRoster>,
    mut rounds: ResMut<RoundState>,
    mut input: ResMut<InputState>,
    mut started: EventWriter<RoundStarted>,
) {
    crate::player::spawn_player(&mut commands);

    let event = spawn_round_batch(
        1,
        time.elapsed_secs_f64(),
        &mut roster,
        &mut rounds,
        &mut input,
        |ghost| commands.spawn(ghost).id(),
    );
    started.write(event);
}

/// Система: волна зачищена → следующая
pub fn advance_round(
    mut commands: Commands,
    time: Res<Time>,
    mut roster: ResMut<GhostRoster>,
    mut rounds: ResMut<RoundState>,
    mut input: ResMut<InputState>,
    mut started: EventWriter<RoundStarted>,
) {
    if !rounds.is_cleared(&roster) {
        return;
    }

    let next = rounds.round + 1;
    let event = spawn_round_batch(
        next,
        time.elapsed_secs_f64(),
        &mut roster,
        &mut rounds,
        &mut input,
        |ghost| commands.spawn(ghost).id(),
    );
    started.write(event);
}

/// Полный сброс сессии (кнопка «ещё раз» на экране смерти).
///
/// Деспавнит всех призраков и игрока, обнуляет ростер/счётчики/ввод,
/// спавнит нового игрока и волну 1.
pub fn reset_session(world: &mut World) {
    let stale: Vec<Entity> = world
        .query_filtered::<Entity, Or<(With<Ghost>, With<Player>)>>()
        .iter(world)
        .collect();
    for entity in stale {
        world.despawn(entity);
    }

    let now = world.resource::<Time>().elapsed_secs_f64();
    let mut roster = GhostRoster::default();
    let mut rounds = RoundState::default();
    let mut input = InputState::default();

    let player = Player::default();
    let pose = player.render_pose();
    world.spawn((player, pose));

    let event = spawn_round_batch(1, now, &mut roster, &mut rounds, &mut input, |ghost| world.spawn(ghost).id());

    world.insert_resource(roster);
    world.insert_resource(rounds);
    world.insert_resource(input);
    world.insert_resource(SessionStats::default());
    world.insert_resource(PointerDelta::default());
    world.send_event(event);

    crate::logger::log_info("Session reset");
}

/// Round Plugin
pub struct RoundPlugin;

impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RoundState>()
            .init_resource::<SessionStats>()
            .add_event::<RoundStarted>()
            .add_systems(Startup, start_session)
            .add_systems(Update, advance_round.in_set(SimulationSet::Rounds));
    }
}
