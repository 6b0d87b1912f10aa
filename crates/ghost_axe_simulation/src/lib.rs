//! Ghost Axe Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: first-person арена, игрок с топором
//! отбивается от волн призраков.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = game state, правила боя, поведение призраков, волны
//! - Движок = рендер, звук, collision shapes, окно/курсор
//!
//! Движок-биндинг шлёт события (`ControlEvent`, `ContactEvent`,
//! `ProximityEvent`, `PointerMotion`), читает `RenderPose`/`Weapon::offset`
//! и feedback события (`GhostHit`, `PlayerDied`, ...).
//!
//! Порядок кадра (`SimulationSet`, chained):
//! Input → Player → Ghosts → Rounds

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod combat;
pub mod components;
pub mod error;
pub mod ghost;
pub mod headless;
pub mod input;
pub mod logger;
pub mod player;
pub mod round;
pub mod settings;
pub mod timer;

// Re-export базовых типов для удобства
pub use combat::{
    check_damage, CombatPlugin, DamageReport, Dead, GhostDied, GhostHit, OverlayChanged, PlayerDied, PlayerHit,
    PlayerRecovered, SwingPhase, Weapon,
};
pub use components::*;
pub use error::{ArenaError, GestureParseError};
pub use ghost::{GhostPlugin, GhostRoster};
pub use headless::HeadlessArenaPlugin;
pub use input::{
    ChannelGestureSource, ContactActor, ContactEvent, ContactPhase, Control, ControlEvent, ExitRequested, Gesture,
    GestureFeed, GestureSource, InputPlugin, InputState, PointerMotion, ProximityEvent,
};
pub use logger::init_logger;
pub use player::PlayerPlugin;
pub use round::{reset_session, RoundPlugin, RoundStarted, RoundState, SessionStats};
pub use settings::{InputMode, Settings};
pub use timer::CooldownTimer;

/// Шаг headless симуляции (60 кадров/сек)
pub const HEADLESS_FRAME: Duration = Duration::from_nanos(16_666_667);

/// Seed для сессий без явного seed (RNG симуляции нужен только боту)
pub const DEFAULT_SEED: u64 = 42;

/// Порядок систем внутри кадра
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// События движка → InputState
    Input,
    /// Игрок: движение, урон, топор
    Player,
    /// Призраки: движение, удары, смерть
    Ghosts,
    /// Волны
    Rounds,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Player,
                SimulationSet::Ghosts,
                SimulationSet::Rounds,
            )
                .chain(),
        )
        .init_resource::<Settings>()
        .init_resource::<ArenaBounds>()
        // Подсистемы
        .add_plugins((InputPlugin, CombatPlugin, PlayerPlugin, GhostPlugin, RoundPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции.
///
/// Время идёт фиксированными шагами `HEADLESS_FRAME` (первый кадр: dt = 0),
/// поэтому прогоны с одинаковым вводом воспроизводимы.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(HEADLESS_FRAME))
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Создаёт App игровой сессии (реальное время).
///
/// Gesture mode без подключённого устройства = фатальная ошибка конфигурации,
/// поиск устройства во время сессии не повторяется.
pub fn create_session_app(settings: Settings, gesture_source: Option<Box<dyn GestureSource>>) -> Result<App, ArenaError> {
    let feed = match (settings.input_mode, gesture_source) {
        (InputMode::Gesture, None) => {
            let reason = "gesture input selected but no device is connected";
            logger::log_error(reason);
            return Err(ArenaError::GestureDeviceUnavailable(reason.to_string()));
        }
        (_, source) => source.map(GestureFeed::new),
    };

    let mut app = create_headless_app(DEFAULT_SEED);
    app.insert_resource(TimeUpdateStrategy::Automatic);

    logger::log_info(&format!("Session starting in {:?} mode", settings.input_mode));
    app.insert_resource(settings);

    if let Some(feed) = feed {
        app.insert_non_send_resource(feed);
    }

    Ok(app)
}

/// Snapshot мира для сравнения детерминизма
///
/// Игрок, призраки в порядке id, волна и счётчики (через Debug).
pub fn world_snapshot(world: &mut World) -> Vec<u8> {
    let mut snapshot = Vec::new();

    let mut players = world.query::<(&Player, &Weapon)>();
    for (player, weapon) in players.iter(world) {
        snapshot.extend_from_slice(format!("{:?}{:?}", player, weapon).as_bytes());
    }

    // Сортируем по GhostId (Entity index зависит от порядка деспавна)
    let mut ghosts: Vec<_> = world.query::<&Ghost>().iter(world).cloned().collect();
    ghosts.sort_by_key(|ghost| ghost.id);
    for ghost in ghosts {
        snapshot.extend_from_slice(&(ghost.id.index() as u64).to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", ghost).as_bytes());
    }

    let round = world.resource::<RoundState>();
    snapshot.extend_from_slice(format!("{:?}", round).as_bytes());
    let stats = world.resource::<SessionStats>();
    snapshot.extend_from_slice(format!("{:?}", stats).as_bytes());

    snapshot
}
