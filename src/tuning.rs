//! Data-driven game balance
//!
//! Every physics constant lives here so a JSON file can override any subset
//! of them. Missing fields fall back to the values in [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Physics and world tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,

    // === Charge / jump ===
    pub max_charge: f32,
    pub charge_rate: f32,
    pub horizontal_scale: f32,
    pub vertical_scale: f32,

    // === Surfaces ===
    pub default_bounce: f32,
    pub wall_bounce: f32,
    pub default_friction: f32,
    pub air_drag: f32,

    // === Goal / fall ===
    pub goal_tolerance: f32,
    pub fall_margin: f32,

    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub start_x: f32,
    /// Spawn height above the world bottom
    pub start_lift: f32,

    // === Feedback ===
    pub impact_threshold: f32,
    pub max_shake: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,

            max_charge: MAX_CHARGE,
            charge_rate: CHARGE_RATE,
            horizontal_scale: HORIZONTAL_SCALE,
            vertical_scale: VERTICAL_SCALE,

            default_bounce: DEFAULT_BOUNCE,
            wall_bounce: WALL_BOUNCE,
            default_friction: DEFAULT_FRICTION,
            air_drag: AIR_DRAG,

            goal_tolerance: GOAL_TOLERANCE,
            fall_margin: FALL_MARGIN,

            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            start_x: PLAYER_START_X,
            start_lift: PLAYER_START_LIFT,

            impact_threshold: IMPACT_THRESHOLD,
            max_shake: MAX_SHAKE,
        }
    }
}

impl Tuning {
    /// Parse and validate tunables from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: gravity={}, max_charge={}, charge_rate={}",
            tuning.gravity,
            tuning.max_charge,
            tuning.charge_rate
        );
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("gravity", self.gravity),
            ("max_charge", self.max_charge),
            ("charge_rate", self.charge_rate),
            ("horizontal_scale", self.horizontal_scale),
            ("vertical_scale", self.vertical_scale),
            ("default_bounce", self.default_bounce),
            ("wall_bounce", self.wall_bounce),
            ("default_friction", self.default_friction),
            ("air_drag", self.air_drag),
            ("goal_tolerance", self.goal_tolerance),
            ("fall_margin", self.fall_margin),
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("start_x", self.start_x),
            ("start_lift", self.start_lift),
            ("impact_threshold", self.impact_threshold),
            ("max_shake", self.max_shake),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be finite")));
        }

        let positive = [
            ("max_charge", self.max_charge),
            ("charge_rate", self.charge_rate),
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::Invalid(format!("{name} must be positive")));
        }

        if self.player_width > self.world_width {
            return Err(ConfigError::Invalid(
                "player_width exceeds world_width".to_string(),
            ));
        }
        Ok(())
    }

    /// Player bounding box size
    #[inline]
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }

    /// Initial spawn position (top-left corner of the player box)
    #[inline]
    pub fn spawn_position(&self) -> Vec2 {
        Vec2::new(self.start_x, self.world_height - self.start_lift)
    }

    /// Y past which a falling player is respawned
    #[inline]
    pub fn fall_limit(&self) -> f32 {
        self.world_height + self.fall_margin
    }
}
