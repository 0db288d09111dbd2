//! Game state and core simulation types
//!
//! Everything the tick touches lives in [`GameState`]; input commands and the
//! tick mutate it strictly one after another.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::charge;
use super::checkpoint;
use super::geometry::{Aabb, Side};
use super::level::Level;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active climbing
    Playing,
    /// Goal reached; frozen until a full reset
    Victory,
}

/// Horizontal jump direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    None,
    Right,
}

impl Direction {
    /// -1, 0 or 1
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::None => 0.0,
            Direction::Right => 1.0,
        }
    }
}

/// Why the player was moved back to the checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RespawnCause {
    /// Explicit respawn request
    Manual,
    /// Fell past the bottom of the world
    Fell,
}

/// Notifications for the presentation layer (sound, particles, screen shake)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Jump released
    Jumped { direction: Direction, power: f32 },
    /// Landed on an obstacle after being airborne
    Landed { obstacle: usize },
    /// Hard hit against an obstacle side/bottom or a screen edge
    Impact {
        pos: Vec2,
        side: Side,
        speed: f32,
        shake: f32,
    },
    /// A new, higher checkpoint was recorded
    CheckpointReached { obstacle: usize, pos: Vec2 },
    /// Player moved back to the checkpoint
    Respawned { cause: RespawnCause },
    /// Goal reached
    Victory {
        elapsed_ms: f64,
        jumps: u32,
        respawns: u32,
    },
    /// Whole run restarted
    Reset,
}

/// The climber
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    /// Width and height of the bounding box
    pub size: Vec2,
    pub on_ground: bool,
    pub charging: bool,
    pub charge_direction: Direction,
    /// Charge power in [0, max_charge]
    pub charge_power: f32,
    pub jump_count: u32,
    pub reset_count: u32,
    /// Clock value (ms) when the run started
    pub start_ms: f64,
    /// Clock value (ms) when the goal was reached
    pub victory_ms: Option<f64>,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2, start_ms: f64) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            on_ground: false,
            charging: false,
            charge_direction: Direction::None,
            charge_power: 0.0,
            jump_count: 0,
            reset_count: 0,
            start_ms,
            victory_ms: None,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb {
            min: self.pos,
            size: self.size,
        }
    }

    /// Horizontal center of the bounding box
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x * 0.5
    }

    /// Y of the bottom edge
    #[inline]
    pub fn feet_y(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Run time so far, frozen once the goal is reached
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        self.victory_ms.unwrap_or(now_ms) - self.start_ms
    }

    /// Drop any charge in progress
    pub fn clear_charge(&mut self) {
        self.charging = false;
        self.charge_power = 0.0;
        self.charge_direction = Direction::None;
    }
}

/// Respawn point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Player position to respawn at
    pub pos: Vec2,
    /// Index into the level of the platform the checkpoint rests on
    pub platform: Option<usize>,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub level: Level,
    pub player: Player,
    pub checkpoint: Checkpoint,
    pub phase: GamePhase,
    /// Simulation tick counter (reset with the run)
    pub time_ticks: u64,
    /// Pending notifications, drained by the presentation layer
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a new run on `level`
    pub fn new(tuning: Tuning, level: Level, now_ms: f64) -> Self {
        let spawn = tuning.spawn_position();
        let player = Player::new(spawn, tuning.player_size(), now_ms);
        let mut state = Self {
            tuning,
            level,
            player,
            checkpoint: Checkpoint {
                pos: spawn,
                platform: None,
            },
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
        };
        let platform = checkpoint::find_checkpoint_platform(&state);
        state.checkpoint.platform = platform;
        state
    }

    /// Default tuning on the built-in junk pile
    pub fn junk_pile(now_ms: f64) -> Self {
        let tuning = Tuning::default();
        let level = Level::junk_pile(tuning.world_width, tuning.world_height);
        Self::new(tuning, level, now_ms)
    }

    /// Start charging a jump toward `direction`
    pub fn begin_charge(&mut self, direction: Direction) {
        if self.phase != GamePhase::Playing {
            return;
        }
        charge::begin_charge(&mut self.player, direction);
    }

    /// Switch the direction of the charge in progress, keeping its power
    pub fn swap_charge_direction(&mut self, direction: Direction) {
        if self.phase != GamePhase::Playing {
            return;
        }
        charge::swap_direction(&mut self.player, direction);
    }

    /// Release the charged jump
    pub fn release_jump(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if let Some(event) = charge::release_jump(&mut self.player, &self.tuning) {
            self.events.push(event);
        }
    }

    /// Move the player back to the last checkpoint
    pub fn request_respawn(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        checkpoint::respawn(self, RespawnCause::Manual);
    }

    /// Throw away the run and start over on the same level
    pub fn request_full_reset(&mut self, now_ms: f64) {
        let events = std::mem::take(&mut self.events);
        *self = Self::new(self.tuning.clone(), self.level.clone(), now_ms);
        self.events = events;
        self.events.push(GameEvent::Reset);
        log::info!("Run reset");
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// True once the goal has been reached
    #[inline]
    pub fn is_victory(&self) -> bool {
        self.phase == GamePhase::Victory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_starts_on_ground_checkpoint() {
        let state = GameState::junk_pile(0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(50.0, 500.0));
        assert_eq!(state.checkpoint.pos, Vec2::new(50.0, 500.0));
        assert_eq!(state.checkpoint.platform, Some(0));
        assert_eq!(state.player.jump_count, 0);
        assert_eq!(state.player.reset_count, 0);
    }

    #[test]
    fn test_full_reset_replaces_player() {
        let mut state = GameState::junk_pile(0.0);
        state.player.jump_count = 7;
        state.player.reset_count = 3;
        state.player.pos = Vec2::new(700.0, 100.0);
        state.phase = GamePhase::Victory;
        state.player.victory_ms = Some(9_000.0);

        state.request_full_reset(10_000.0);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.jump_count, 0);
        assert_eq!(state.player.reset_count, 0);
        assert_eq!(state.player.start_ms, 10_000.0);
        assert!(state.player.victory_ms.is_none());
        assert_eq!(state.player.pos, state.tuning.spawn_position());
        assert_eq!(state.level.len(), 8);
        assert_eq!(state.drain_events(), vec![GameEvent::Reset]);
    }

    #[test]
    fn test_elapsed_freezes_at_victory() {
        let mut player = Player::new(Vec2::ZERO, Vec2::new(40.0, 60.0), 1_000.0);
        assert_eq!(player.elapsed_ms(4_000.0), 3_000.0);
        player.victory_ms = Some(5_000.0);
        assert_eq!(player.elapsed_ms(60_000.0), 4_000.0);
    }

    #[test]
    fn test_commands_ignored_during_victory() {
        let mut state = GameState::junk_pile(0.0);
        state.player.on_ground = true;
        state.phase = GamePhase::Victory;
        state.begin_charge(Direction::Right);
        assert!(!state.player.charging);
        state.request_respawn();
        assert_eq!(state.player.reset_count, 0);
    }
}
