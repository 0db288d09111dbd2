//! Simulation tick
//!
//! One call per frame: apply queued commands in arrival order, then advance
//! charge, gravity, movement, collisions, fall recovery and the goal check.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::checkpoint;
use super::charge;
use super::collision;
use super::geometry::Aabb;
use super::state::{Direction, GameEvent, GamePhase, GameState, RespawnCause};

/// Commands produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    BeginCharge(Direction),
    /// Redirect a charge in progress (pointer crossing the player)
    SwapDirection(Direction),
    ReleaseJump,
    Respawn,
    FullReset,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Commands received since the previous tick, oldest first
    pub commands: Vec<Command>,
    /// Host clock in milliseconds
    pub now_ms: f64,
}

impl TickInput {
    pub fn at(now_ms: f64) -> Self {
        Self {
            commands: Vec::new(),
            now_ms,
        }
    }

    pub fn with(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }
}

/// Apply a single command
pub fn apply_command(state: &mut GameState, command: Command, now_ms: f64) {
    match command {
        Command::BeginCharge(direction) => state.begin_charge(direction),
        Command::SwapDirection(direction) => state.swap_charge_direction(direction),
        Command::ReleaseJump => state.release_jump(),
        Command::Respawn => state.request_respawn(),
        Command::FullReset => state.request_full_reset(now_ms),
    }
}

/// Advance the game by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    for &command in &input.commands {
        apply_command(state, command, input.now_ms);
    }

    // Frozen until a full reset
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    step_physics(state);

    if state.player.pos.y > state.tuning.fall_limit() {
        checkpoint::respawn(state, RespawnCause::Fell);
    }

    check_victory(state, input.now_ms);
}

/// Charge, gravity, integration, collisions and drag
fn step_physics(state: &mut GameState) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    charge::advance_charge(player, tuning);

    player.vel.y += tuning.gravity;
    player.pos += player.vel;

    collision::resolve_collisions(state);

    let player = &mut state.player;
    if player.on_ground {
        player.vel.x = 0.0;
    } else {
        player.vel.x *= state.tuning.air_drag;
    }
}

/// True when the player's center is over the goal and the feet are on it
pub fn reached_goal(state: &GameState) -> bool {
    let goal = state.level.goal();
    // Goal box stretched down by the tolerance
    let zone = Aabb::new(
        goal.x,
        goal.y,
        goal.width,
        goal.height + state.tuning.goal_tolerance,
    );
    zone.contains_point(Vec2::new(state.player.center_x(), state.player.feet_y()))
}

fn check_victory(state: &mut GameState, now_ms: f64) {
    if state.phase != GamePhase::Playing || !reached_goal(state) {
        return;
    }

    let goal_y = state.level.goal().y;
    let player = &mut state.player;
    player.vel = Vec2::ZERO;
    player.pos.y = goal_y - player.size.y;
    player.on_ground = true;
    player.clear_charge();
    player.victory_ms = Some(now_ms);

    state.phase = GamePhase::Victory;

    let elapsed_ms = state.player.elapsed_ms(now_ms);
    let jumps = state.player.jump_count;
    let respawns = state.player.reset_count;
    log::info!(
        "Victory in {} ({} jumps, {} respawns)",
        crate::format_elapsed(elapsed_ms),
        jumps,
        respawns
    );
    state.events.push(GameEvent::Victory {
        elapsed_ms,
        jumps,
        respawns,
    });
}
