//! Headless арена: заглушка движка для прогонов без рендера
//!
//! Настоящий движок сам считает коллизии и шлёт события. Для headless
//! симуляции (main.rs, тесты детерминизма) их заменяют:
//! - `emulate_contacts`: пересечения сфер → ContactEvent/ProximityEvent
//! - `drive_bot`: простой FSM бот (seeded RNG) → ControlEvent/PointerMotion
//!
//! Обе системы идут ДО `SimulationSet::Input`: события этого кадра
//! видны input-системам сразу, позиции: с прошлого кадра.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::{Dead, Weapon};
use crate::components::{Ghost, GhostId, Player};
use crate::ghost::GhostRoster;
use crate::input::{ContactActor, ContactEvent, Control, ControlEvent, PointerMotion, ProximityEvent};
use crate::player::heading_step;
use crate::settings::Settings;
use crate::{DeterministicRng, SimulationSet};

/// Радиус касания призрак↔игрок (капсула призрака 1.0 + игрока 0.5)
pub const PLAYER_CONTACT_RADIUS: f32 = 1.5;

/// Радиус касания лезвия топора
pub const WEAPON_CONTACT_RADIUS: f32 = 1.0;

/// Призраки «упираются» друг в друга (две капсулы радиуса 1.0)
pub const GHOST_CONTACT_RADIUS: f32 = 2.0;

/// Дистанция, с которой бот начинает махать
const BOT_STRIKE_RANGE: f32 = 2.5;

/// Максимальная скорость поворота бота (градусы/сек)
const BOT_TURN_RATE: f32 = 240.0;

/// Прошлый кадр пересечений (для start/end пар)
#[derive(Resource, Debug, Default)]
pub struct ContactTracker {
    weapon: Vec<GhostId>,
    player: Vec<GhostId>,
}

/// Точка лезвия в мире: offset топора повёрнут по heading игрока.
/// `offset.x` смотрит вправо, `offset.y` вперёд.
pub fn weapon_point(player: &Player, weapon: &Weapon) -> Vec2 {
    let heading = player.heading.to_radians();
    let forward = heading_step(heading, 1.0);
    let right = heading_step(heading - std::f32::consts::FRAC_PI_2, 1.0);
    player.planar_position() + right * weapon.offset.x + forward * weapon.offset.y
}

/// Разница set'ов контактов → пары Started/Ended.
fn diff_contacts(
    actor: ContactActor,
    previous: &[GhostId],
    current: &[GhostId],
    events: &mut EventWriter<ContactEvent>,
) {
    for ghost in current.iter().filter(|ghost| !previous.contains(ghost)) {
        events.write(ContactEvent::started(actor, *ghost));
    }
    for ghost in previous.iter().filter(|ghost| !current.contains(ghost)) {
        events.write(ContactEvent::ended(actor, *ghost));
    }
}

/// Система: сферы вместо collision shapes.
pub fn emulate_contacts(
    roster: Res<GhostRoster>,
    mut tracker: ResMut<ContactTracker>,
    players: Query<(&Player, &Weapon)>,
    ghosts: Query<&Ghost>,
    mut contacts: EventWriter<ContactEvent>,
    mut proximity: EventWriter<ProximityEvent>,
) {
    let active: Vec<(GhostId, Vec2)> = roster
        .live()
        .filter_map(|(_, entity)| ghosts.get(entity).ok())
        .filter(|ghost| ghost.is_active())
        .map(|ghost| (ghost.id, ghost.position))
        .collect();

    let (weapon_now, player_now) = match players.single() {
        Ok((player, weapon)) => {
            let blade = weapon_point(player, weapon);
            let body = player.planar_position();
            let touching = |center: Vec2, radius: f32| {
                active
                    .iter()
                    .filter(|(_, position)| position.distance(center) < radius)
                    .map(|(id, _)| *id)
                    .collect::<Vec<_>>()
            };
            (
                touching(blade, WEAPON_CONTACT_RADIUS),
                touching(body, PLAYER_CONTACT_RADIUS),
            )
        }
        Err(_) => (Vec::new(), Vec::new()),
    };

    diff_contacts(ContactActor::Weapon, &tracker.weapon, &weapon_now, &mut contacts);
    diff_contacts(ContactActor::Player, &tracker.player, &player_now, &mut contacts);
    tracker.weapon = weapon_now;
    tracker.player = player_now;

    // Близость шлётся каждый кадр, пока призраки перекрываются (last write wins)
    for (index, (ghost, position)) in active.iter().enumerate() {
        for (other, other_position) in active.iter().skip(index + 1) {
            if position.distance(*other_position) < GHOST_CONTACT_RADIUS {
                proximity.write(ProximityEvent { ghost: *ghost, other: *other });
                proximity.write(ProximityEvent { ghost: *other, other: *ghost });
            }
        }
    }
}

/// Состояние бота
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotState {
    /// Целей нет: бродим
    #[default]
    Wander,
    /// Идём к ближайшему призраку
    Approach(GhostId),
    /// В радиусе удара: машем
    Strike(GhostId),
}

/// Виртуальный игрок: держит свою раскладку контролов, чтобы слать только фронты.
#[derive(Resource, Debug, Default)]
pub struct BotPilot {
    pub state: BotState,
    pressed: [bool; Control::ALL.len()],
}

impl BotPilot {
    fn set(&mut self, control: Control, pressed: bool, events: &mut EventWriter<ControlEvent>) {
        let slot = &mut self.pressed[control as usize];
        if *slot != pressed {
            *slot = pressed;
            events.write(ControlEvent { control, pressed });
        }
    }

    fn is_pressed(&self, control: Control) -> bool {
        self.pressed[control as usize]
    }
}

/// heading камеры, смотрящей на `to` (обратное к `heading_step`)
fn player_heading_towards(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    (-delta.x).atan2(delta.y).to_degrees()
}

/// Система: FSM бот.
pub fn drive_bot(
    time: Res<Time>,
    settings: Res<Settings>,
    roster: Res<GhostRoster>,
    mut rng: ResMut<DeterministicRng>,
    mut pilot: ResMut<BotPilot>,
    players: Query<&Player, Without<Dead>>,
    ghosts: Query<&Ghost>,
    mut controls: EventWriter<ControlEvent>,
    mut pointer: EventWriter<PointerMotion>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    let dt = time.delta_secs();
    let position = player.planar_position();

    let nearest = roster
        .live()
        .filter_map(|(_, entity)| ghosts.get(entity).ok())
        .filter(|ghost| ghost.is_active())
        .map(|ghost| (ghost.id, ghost.position.distance(position), ghost.position))
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let Some((target, distance, target_position)) = nearest else {
        pilot.state = BotState::Wander;
        pilot.set(Control::Attack, false, &mut controls);
        let forward = rng.rng.gen_bool(0.5);
        pilot.set(Control::Forward, forward, &mut controls);
        return;
    };

    // Поворот к цели через pointer delta (как мышь)
    let wanted = player_heading_towards(position, target_position);
    let diff = (wanted - player.heading + 180.0).rem_euclid(360.0) - 180.0;
    if dt > 0.0 && settings.sensitivity_x > 0.0 {
        let turn = diff.clamp(-BOT_TURN_RATE * dt, BOT_TURN_RATE * dt);
        let jitter = rng.rng.gen_range(-0.5..=0.5) * dt;
        pointer.write(PointerMotion {
            delta: Vec2::new(-(turn + jitter) / (settings.sensitivity_x * dt), 0.0),
        });
    }

    if distance > BOT_STRIKE_RANGE {
        pilot.state = BotState::Approach(target);
        pilot.set(Control::Forward, true, &mut controls);
        pilot.set(Control::Attack, false, &mut controls);
        return;
    }

    pilot.state = BotState::Strike(target);
    pilot.set(Control::Forward, false, &mut controls);

    // Замах edge-triggered: чередуем press/release, темп решает RNG
    let attack = !pilot.is_pressed(Control::Attack) && rng.rng.gen_bool(0.6);
    pilot.set(Control::Attack, attack, &mut controls);
}

/// Headless Arena Plugin (заглушка коллизий + бот)
pub struct HeadlessArenaPlugin;

impl Plugin for HeadlessArenaPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContactTracker>()
            .init_resource::<BotPilot>()
            .add_systems(
                Update,
                (emulate_contacts, drive_bot).chain().before(SimulationSet::Input),
            );
    }
}
