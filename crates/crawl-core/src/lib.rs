//! **crawl-core** — primitives for grid-locked dungeon crawlers.
//!
//! This crate provides the small vocabulary the rest of the project is
//! written in: integer geometry ([`Point`], [`Range`]), the cardinal
//! [`Facing`] that drives both movement and attack targeting, an
//! integer-cell tile [`Grid`], and the interpolation helpers that turn a
//! committed grid transition into smooth real-time motion.

pub mod ease;
pub mod facing;
pub mod geom;
pub mod grid;

pub use ease::{ease_in_out, lerp, wrap_angle};
pub use facing::{Facing, TurnDir};
pub use geom::{Point, Range};
pub use grid::{Cell, Grid};
