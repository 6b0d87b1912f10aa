//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - world: арена и hand-off трансформа в движок (ArenaBounds, RenderPose)
//! - ghost: призраки и их идентичность в ростере (Ghost, GhostId)
//! - player: игрок (Player, DamageOverlay)

pub mod world;
pub mod ghost;
pub mod player;

// Re-exports для удобного импорта
pub use world::*;
pub use ghost::*;
pub use player::*;
