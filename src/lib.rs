//! Kettle Climb - a charge-and-release jump platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, checkpoints, game state)
//! - `input`: Device event normalization into simulation commands
//! - `tuning`: Data-driven physics tunables
//! - `settings`: Player control preferences
//! - `records`: Best-run leaderboard

pub mod error;
pub mod input;
pub mod records;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use records::RunRecords;
pub use settings::{Settings, SwapPolicy};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Gravity acceleration (units per tick²)
    pub const GRAVITY: f32 = 0.5;

    /// Maximum charge power
    pub const MAX_CHARGE: f32 = 100.0;
    /// Charge gained per tick while holding a direction
    pub const CHARGE_RATE: f32 = 0.8;
    /// Horizontal launch speed at full charge
    pub const HORIZONTAL_SCALE: f32 = 10.0;
    /// Vertical launch speed per sqrt(charge)
    pub const VERTICAL_SCALE: f32 = 1.5;

    /// Restitution for obstacles without a bounce override
    pub const DEFAULT_BOUNCE: f32 = 0.3;
    /// Restitution against the left/right screen edges
    pub const WALL_BOUNCE: f32 = 0.3;
    /// Sliding friction for obstacles without a friction override
    pub const DEFAULT_FRICTION: f32 = 0.95;
    /// Horizontal velocity retained per airborne tick
    pub const AIR_DRAG: f32 = 0.98;

    /// Slack below the goal surface that still counts as standing on it
    pub const GOAL_TOLERANCE: f32 = 5.0;
    /// Distance below the world bottom that triggers a respawn
    pub const FALL_MARGIN: f32 = 100.0;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_START_X: f32 = 50.0;
    /// Spawn height above the world bottom
    pub const PLAYER_START_LIFT: f32 = 100.0;

    /// Minimum post-collision speed reported as an impact
    pub const IMPACT_THRESHOLD: f32 = 2.0;
    /// Cap on the screen shake intensity attached to impacts
    pub const MAX_SHAKE: f32 = 5.0;
}

/// Format elapsed milliseconds as `m:ss`
pub fn format_elapsed(elapsed_ms: f64) -> String {
    let total_secs = (elapsed_ms.max(0.0) / 1000.0).floor() as u64;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
