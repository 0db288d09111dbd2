//! Control preferences
//!
//! Persisted separately from tuning. Defaults reproduce the classic controls:
//! the pointer can redirect a charge by crossing the player, keys cannot.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Whether a charge in progress follows later directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SwapPolicy {
    /// Direction is fixed when the charge starts
    #[default]
    Locked,
    /// Direction follows the latest input without losing charge
    Follow,
}

impl SwapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapPolicy::Locked => "Locked",
            SwapPolicy::Follow => "Follow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "locked" | "lock" => Some(SwapPolicy::Locked),
            "follow" => Some(SwapPolicy::Follow),
            _ => None,
        }
    }
}

/// How a touch position picks a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TouchSplit {
    /// Left/right half of the screen
    #[default]
    ScreenHalves,
    /// Left/right of the player, like the pointer
    PlayerCenter,
}

/// Player control preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mouse/pen charge direction policy
    pub pointer_swap: SwapPolicy,
    /// Keyboard charge direction policy
    pub keyboard_swap: SwapPolicy,
    /// Touch charge direction policy
    pub touch_swap: SwapPolicy,
    pub touch_split: TouchSplit,
    /// Let the confirm key restart mid-run, not only after victory
    pub confirm_restarts_anytime: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pointer_swap: SwapPolicy::Follow,
            keyboard_swap: SwapPolicy::Locked,
            touch_swap: SwapPolicy::Locked,
            touch_split: TouchSplit::ScreenHalves,
            confirm_restarts_anytime: false,
        }
    }
}

impl Settings {
    /// Same policy for every input device
    pub fn uniform(policy: SwapPolicy) -> Self {
        Self {
            pointer_swap: policy,
            keyboard_swap: policy,
            touch_swap: policy,
            ..Self::default()
        }
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings = serde_json::from_str(json)?;
        log::info!("Loaded settings");
        Ok(settings)
    }

    /// Parse settings, falling back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
