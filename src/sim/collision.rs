//! Collision detection and response against level geometry
//!
//! Discrete AABB resolution: each overlapping obstacle is resolved along the
//! side with the smallest penetration depth (minimum translation vector).
//! A fast body that sinks deep into an obstacle can therefore resolve to an
//! unexpected side or tunnel through thin geometry. Obstacles are resolved
//! one after another in level order with no iteration.

use glam::Vec2;

use super::checkpoint;
use super::geometry::Side;
use super::level::Obstacle;
use super::state::{GameEvent, GameState, Player};
use crate::tuning::Tuning;

/// Resolve the player against one obstacle.
///
/// Returns the obstacle side that was struck, or `None` if there was no
/// overlap or every minimal side was rejected by its velocity guard.
pub fn resolve_obstacle(player: &mut Player, obstacle: &Obstacle, tuning: &Tuning) -> Option<Side> {
    let overlap = player.bounds().overlap(&obstacle.bounds())?;
    let restitution = obstacle.restitution(tuning.default_bounce);

    // Guards skip sides the player is moving away from
    let side = overlap.min_sides().find(|side| match side {
        Side::Top => player.vel.y >= 0.0,
        Side::Bottom => player.vel.y <= 0.0,
        Side::Left => player.vel.x >= 0.0,
        Side::Right => player.vel.x <= 0.0,
    })?;

    match side {
        Side::Top => {
            player.pos.y = obstacle.y - player.size.y;
            player.vel.y = 0.0;
            player.on_ground = true;
            // Hard stop on landing
            player.vel.x = 0.0;
        }
        Side::Bottom => {
            player.pos.y = obstacle.y + obstacle.height;
            player.vel.y = player.vel.y.abs() * restitution;
        }
        Side::Left => {
            player.pos.x = obstacle.x - player.size.x;
            player.vel.x = -player.vel.x * restitution;
        }
        Side::Right => {
            player.pos.x = obstacle.x + obstacle.width;
            player.vel.x = -player.vel.x * restitution;
        }
    }
    Some(side)
}

/// Keep the player between the left and right screen edges.
///
/// The edges behave like walls beyond the screen: hitting the left edge
/// strikes that wall's right face and vice versa.
pub fn resolve_world_bounds(player: &mut Player, tuning: &Tuning) -> Option<Side> {
    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
        player.vel.x = -player.vel.x * tuning.wall_bounce;
        Some(Side::Right)
    } else if player.pos.x + player.size.x > tuning.world_width {
        player.pos.x = tuning.world_width - player.size.x;
        player.vel.x = -player.vel.x * tuning.wall_bounce;
        Some(Side::Left)
    } else {
        None
    }
}

/// Impact notification for a non-landing hit, if it was hard enough
pub fn impact_event(player: &Player, side: Side, tuning: &Tuning) -> Option<GameEvent> {
    let (speed, pos) = match side {
        Side::Top => return None,
        Side::Bottom => (
            player.vel.y.abs(),
            Vec2::new(player.center_x(), player.pos.y),
        ),
        Side::Left => (
            player.vel.x.abs(),
            Vec2::new(player.pos.x + player.size.x, player.pos.y + player.size.y * 0.5),
        ),
        Side::Right => (
            player.vel.x.abs(),
            Vec2::new(player.pos.x, player.pos.y + player.size.y * 0.5),
        ),
    };
    if speed <= tuning.impact_threshold {
        return None;
    }
    Some(GameEvent::Impact {
        pos,
        side,
        speed,
        shake: (speed / 2.0).min(tuning.max_shake),
    })
}

/// Resolve every obstacle in level order, then the screen edges.
///
/// Clears and recomputes `on_ground`, moves the checkpoint on top landings
/// and queues landing/impact/checkpoint events.
pub fn resolve_collisions(state: &mut GameState) {
    let GameState {
        tuning,
        level,
        player,
        checkpoint: respawn_point,
        events,
        ..
    } = state;

    let was_on_ground = player.on_ground;
    player.on_ground = false;
    let mut landed = false;

    for (index, obstacle) in level.obstacles().iter().enumerate() {
        let Some(side) = resolve_obstacle(player, obstacle, tuning) else {
            continue;
        };
        if side == Side::Top {
            if !was_on_ground && !landed {
                events.push(GameEvent::Landed { obstacle: index });
            }
            landed = true;
            if let Some(event) = checkpoint::on_top_landing(respawn_point, level, index, player.pos) {
                events.push(event);
            }
        } else if let Some(event) = impact_event(player, side, tuning) {
            events.push(event);
        }
    }

    if let Some(side) = resolve_world_bounds(player, tuning) {
        if let Some(event) = impact_event(player, side, tuning) {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::SurfaceType;

    fn player_at(x: f32, y: f32, vel: Vec2) -> Player {
        let mut p = Player::new(Vec2::new(x, y), Vec2::new(40.0, 60.0), 0.0);
        p.vel = vel;
        p
    }

    #[test]
    fn test_landing_zeroes_velocity() {
        let tuning = Tuning::default();
        let ground = Obstacle::new(0.0, 560.0, 800.0, 40.0, SurfaceType::Ground);
        let mut p = player_at(100.0, 505.0, Vec2::new(7.5, 9.0));

        let side = resolve_obstacle(&mut p, &ground, &tuning);

        assert_eq!(side, Some(Side::Top));
        assert_eq!(p.pos.y, 500.0);
        assert_eq!(p.vel, Vec2::ZERO);
        assert!(p.on_ground);
    }

    #[test]
    fn test_left_side_bounce_uses_obstacle_restitution() {
        let tuning = Tuning::default();
        let tire = Obstacle::new(560.0, 280.0, 50.0, 20.0, SurfaceType::Tire).with_bounce(0.4);
        // Right edge 3 units into the tire's left face, moving right
        let mut p = player_at(523.0, 260.0, Vec2::new(6.0, 0.0));

        let side = resolve_obstacle(&mut p, &tire, &tuning);

        assert_eq!(side, Some(Side::Left));
        assert_eq!(p.pos.x, tire.x - p.size.x);
        assert!((p.vel.x - -2.4).abs() < 1e-5);
    }

    #[test]
    fn test_right_side_bounce() {
        let tuning = Tuning::default();
        let tire = Obstacle::new(560.0, 280.0, 50.0, 20.0, SurfaceType::Tire).with_bounce(0.4);
        let mut p = player_at(607.0, 260.0, Vec2::new(-6.0, 0.0));

        let side = resolve_obstacle(&mut p, &tire, &tuning);

        assert_eq!(side, Some(Side::Right));
        assert_eq!(p.pos.x, tire.x + tire.width);
        assert!((p.vel.x - 2.4).abs() < 1e-5);
    }

    #[test]
    fn test_bottom_hit_bounces_down() {
        let tuning = Tuning::default();
        let car = Obstacle::new(240.0, 450.0, 100.0, 40.0, SurfaceType::Car);
        // Head 2 units into the underside, moving up
        let mut p = player_at(270.0, 488.0, Vec2::new(0.0, -8.0));

        let side = resolve_obstacle(&mut p, &car, &tuning);

        assert_eq!(side, Some(Side::Bottom));
        assert_eq!(p.pos.y, 490.0);
        assert!((p.vel.y - 8.0 * 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_guard_rejects_side_moving_away() {
        let tuning = Tuning::default();
        let ground = Obstacle::new(0.0, 560.0, 800.0, 40.0, SurfaceType::Ground);
        // Shallow top overlap but moving upward: nothing resolves
        let mut p = player_at(100.0, 502.0, Vec2::new(0.0, -3.0));

        assert_eq!(resolve_obstacle(&mut p, &ground, &tuning), None);
        assert_eq!(p.pos.y, 502.0);
        assert_eq!(p.vel.y, -3.0);
    }

    #[test]
    fn test_deep_fall_resolves_to_side() {
        // Known limitation: a fast fall next to a thin obstacle's edge can
        // pick a side instead of the top.
        let tuning = Tuning::default();
        let tv = Obstacle::new(370.0, 400.0, 60.0, 25.0, SurfaceType::Tv);
        let mut p = player_at(335.0, 350.0, Vec2::new(1.0, 14.0));

        let side = resolve_obstacle(&mut p, &tv, &tuning);

        assert_eq!(side, Some(Side::Left));
        assert!(!p.on_ground);
    }

    #[test]
    fn test_world_bounds() {
        let tuning = Tuning::default();
        let mut p = player_at(-4.0, 100.0, Vec2::new(-8.0, 0.0));
        assert_eq!(resolve_world_bounds(&mut p, &tuning), Some(Side::Right));
        assert_eq!(p.pos.x, 0.0);
        assert!((p.vel.x - 2.4).abs() < 1e-5);

        let mut p = player_at(770.0, 100.0, Vec2::new(5.0, 0.0));
        assert_eq!(resolve_world_bounds(&mut p, &tuning), Some(Side::Left));
        assert_eq!(p.pos.x, 760.0);
        assert!((p.vel.x - -1.5).abs() < 1e-5);
    }

    #[test]
    fn test_impact_threshold() {
        let tuning = Tuning::default();
        let soft = player_at(0.0, 0.0, Vec2::new(1.5, 0.0));
        assert!(impact_event(&soft, Side::Left, &tuning).is_none());

        let hard = player_at(0.0, 0.0, Vec2::new(-14.0, 0.0));
        match impact_event(&hard, Side::Right, &tuning) {
            Some(GameEvent::Impact { speed, shake, .. }) => {
                assert_eq!(speed, 14.0);
                assert_eq!(shake, tuning.max_shake);
            }
            other => panic!("expected impact, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_collisions_updates_checkpoint_and_events() {
        let mut state = GameState::junk_pile(0.0);
        // Dropping onto the sofa (top at y = 500)
        state.player.pos = Vec2::new(130.0, 443.0);
        state.player.vel = Vec2::new(0.0, 4.0);
        state.player.on_ground = false;

        resolve_collisions(&mut state);

        assert!(state.player.on_ground);
        assert_eq!(state.player.pos.y, 440.0);
        assert_eq!(state.checkpoint.platform, Some(1));
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Landed { obstacle: 1 }));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::CheckpointReached { obstacle: 1, .. })));
    }
}
