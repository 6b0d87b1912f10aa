//! Headless симуляция Ghost Axe
//!
//! Запускает Bevy App без рендера. Коллизии считает заглушка из сфер,
//! вводом управляет seeded бот. Печатает прогресс волн до смерти игрока или лимита тиков.

use ghost_axe_simulation::logger::{set_log_level, LogLevel};
use ghost_axe_simulation::{
    create_headless_app, world_snapshot, Dead, HeadlessArenaPlugin, Player, RoundState, SessionStats,
};

const MAX_TICKS: usize = 60 * 60 * 5;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(ghost_axe_simulation::DEFAULT_SEED);
    println!("Starting Ghost Axe headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(HeadlessArenaPlugin);
    // Per-hit debug логи бота на тысячах тиков только шумят
    set_log_level(LogLevel::Info);

    for tick in 0..MAX_TICKS {
        app.update();

        let world = app.world_mut();
        let dead = world
            .query_filtered::<&Player, bevy::prelude::With<Dead>>()
            .iter(world)
            .next()
            .is_some();

        if tick % 600 == 0 || dead {
            let round = world.resource::<RoundState>().round;
            let kills = world.resource::<SessionStats>().kills;
            let health = world
                .query::<&Player>()
                .iter(world)
                .next()
                .map(|player| player.health)
                .unwrap_or(0);
            println!(
                "Tick {}: round {}, kills {}, player health {}",
                tick, round, kills, health
            );
        }

        if dead {
            println!("Player died at tick {}", tick);
            break;
        }
    }

    let snapshot = world_snapshot(app.world_mut());
    println!("Simulation complete! (snapshot: {} bytes)", snapshot.len());
}
