//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock reads (the host passes `now_ms`)
//! - Obstacles resolved in level order
//! - No rendering, audio or platform dependencies

pub mod charge;
pub mod checkpoint;
pub mod collision;
pub mod geometry;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{resolve_collisions, resolve_obstacle, resolve_world_bounds};
pub use geometry::{Aabb, Overlap, Side};
pub use level::{Level, Obstacle, SurfaceType};
pub use state::{
    Checkpoint, Direction, GameEvent, GamePhase, GameState, Player, RespawnCause,
};
pub use tick::{Command, TickInput, apply_command, reached_goal, tick};
