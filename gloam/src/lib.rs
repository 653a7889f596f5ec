//! Gloam — the simulation core of a first-person, grid-locked dungeon
//! crawler.
//!
//! Discrete 90-degree turns and single-cell steps over a fixed tile map,
//! melee combat, two-state monster AI, doors, and the turn clock that
//! drives resource depletion. Rendering, UI, and loot are external
//! collaborators: they feed [`game::Command`]s in and consume the actor
//! snapshot, [`events::GameEvent`]s, and the message log coming out.

pub mod ai;
pub mod combat;
pub mod door;
pub mod entity;
pub mod events;
pub mod game;
pub mod log;
pub mod map;
pub mod movement;
pub mod terrain;
pub mod turn;

pub use game::{Command, Game, Status};
pub use map::DungeonMap;
