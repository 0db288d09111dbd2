//! Checkpoint tracking and respawn
//!
//! The checkpoint only moves upward: it is replaced when the player lands on
//! a platform strictly higher (smaller y) than the one it currently rests on.

use glam::Vec2;

use super::level::Level;
use super::state::{Checkpoint, GameEvent, GameState, RespawnCause};

/// Record a top landing on `obstacle` with the player at `pos`.
/// Returns the event when the checkpoint moved.
pub fn on_top_landing(
    checkpoint: &mut Checkpoint,
    level: &Level,
    obstacle: usize,
    pos: Vec2,
) -> Option<GameEvent> {
    let landed = level.get(obstacle)?;
    let higher = match checkpoint.platform.and_then(|i| level.get(i)) {
        Some(current) => landed.y < current.y,
        None => true,
    };
    if !higher {
        return None;
    }

    checkpoint.pos = pos;
    checkpoint.platform = Some(obstacle);
    log::info!(
        "Checkpoint: obstacle {} ({:?}) at ({:.1}, {:.1})",
        obstacle,
        landed.surface,
        pos.x,
        pos.y
    );
    Some(GameEvent::CheckpointReached { obstacle, pos })
}

/// First obstacle supporting the feet of a player standing at `pos`.
///
/// The feet are the bottom edge of the player box; the obstacle must contain
/// their height and overlap them horizontally.
pub fn find_platform(level: &Level, pos: Vec2, player_size: Vec2) -> Option<usize> {
    let feet_y = pos.y + player_size.y;
    level.obstacles().iter().position(|o| {
        let b = o.bounds();
        let max = b.max();
        feet_y >= b.min.y && feet_y <= max.y && pos.x < max.x && pos.x + player_size.x > b.min.x
    })
}

/// Re-derive the checkpoint's platform from its position
pub fn find_checkpoint_platform(state: &GameState) -> Option<usize> {
    find_platform(&state.level, state.checkpoint.pos, state.player.size)
}

/// Put the player back on the checkpoint with no motion and no charge
pub fn respawn(state: &mut GameState, cause: RespawnCause) {
    let player = &mut state.player;
    player.pos = state.checkpoint.pos;
    player.vel = Vec2::ZERO;
    player.on_ground = false;
    player.clear_charge();
    player.reset_count += 1;

    // Keep the recorded platform if the scan comes up empty
    if let Some(platform) = find_checkpoint_platform(state) {
        state.checkpoint.platform = Some(platform);
    }

    log::info!(
        "Respawned ({:?}) at ({:.1}, {:.1}), resets={}",
        cause,
        state.checkpoint.pos.x,
        state.checkpoint.pos.y,
        state.player.reset_count
    );
    state.events.push(GameEvent::Respawned { cause });
}
