//! Charge-and-release jump controller
//!
//! Holding a direction while grounded builds charge; releasing converts it to
//! a launch velocity. Vertical speed follows sqrt(charge), so the last bit of
//! charge buys less height than the first.

use glam::Vec2;

use super::state::{Direction, GameEvent, Player};
use crate::tuning::Tuning;

/// Start charging toward `direction`. No-op while airborne or already charging.
pub fn begin_charge(player: &mut Player, direction: Direction) {
    if player.charging || !player.on_ground {
        return;
    }
    player.charging = true;
    player.charge_direction = direction;
}

/// Redirect an ongoing charge without touching its power
pub fn swap_direction(player: &mut Player, direction: Direction) {
    if player.charging && player.on_ground {
        player.charge_direction = direction;
    }
}

/// Accumulate charge for one tick, clamped to the maximum
pub fn advance_charge(player: &mut Player, tuning: &Tuning) {
    if player.charging {
        player.charge_power = (player.charge_power + tuning.charge_rate).min(tuning.max_charge);
    }
}

/// Launch velocity for a given charge
pub fn launch_velocity(direction: Direction, power: f32, tuning: &Tuning) -> Vec2 {
    let power_percent = power / tuning.max_charge;
    Vec2::new(
        direction.sign() * power_percent * tuning.horizontal_scale,
        -power.sqrt() * tuning.vertical_scale,
    )
}

/// Release the jump. Airborne releases are ignored (any charge is left as is).
pub fn release_jump(player: &mut Player, tuning: &Tuning) -> Option<GameEvent> {
    if !player.on_ground {
        return None;
    }

    let direction = player.charge_direction;
    let power = player.charge_power;
    player.vel = launch_velocity(direction, power, tuning);

    player.charging = false;
    player.charge_power = 0.0;
    player.on_ground = false;
    player.jump_count += 1;

    log::debug!(
        "Jump #{}: direction={:?} power={:.1} vel=({:.2}, {:.2})",
        player.jump_count,
        direction,
        power,
        player.vel.x,
        player.vel.y
    );

    Some(GameEvent::Jumped { direction, power })
}
