//! Axis-aligned box geometry
//!
//! Screen space: x grows right, y grows down. A box is anchored at its
//! top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

/// Side of an obstacle the player collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Penetration depth of the player into an obstacle from each side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Player's feet below the obstacle's top edge
    pub top: f32,
    /// Player's head above the obstacle's bottom edge
    pub bottom: f32,
    /// Player's right edge past the obstacle's left edge
    pub left: f32,
    /// Player's left edge before the obstacle's right edge
    pub right: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test (touching edges do not intersect)
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        a_max.x > other.min.x
            && self.min.x < b_max.x
            && a_max.y > other.min.y
            && self.min.y < b_max.y
    }

    /// Inclusive point containment
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }

    /// Penetration depths of `self` (the mover) into `obstacle`, or `None`
    /// when they do not intersect
    pub fn overlap(&self, obstacle: &Aabb) -> Option<Overlap> {
        if !self.intersects(obstacle) {
            return None;
        }
        let a_max = self.max();
        let b_max = obstacle.max();
        Some(Overlap {
            top: a_max.y - obstacle.min.y,
            bottom: b_max.y - self.min.y,
            left: a_max.x - obstacle.min.x,
            right: b_max.x - self.min.x,
        })
    }
}

impl Overlap {
    /// Smallest of the four depths
    #[inline]
    pub fn min_depth(&self) -> f32 {
        self.top.min(self.bottom).min(self.left).min(self.right)
    }

    /// Sides whose depth equals the minimum, in resolution priority order
    /// (top, bottom, left, right)
    pub fn min_sides(&self) -> impl Iterator<Item = Side> + '_ {
        let min = self.min_depth();
        [
            (Side::Top, self.top),
            (Side::Bottom, self.bottom),
            (Side::Left, self.left),
            (Side::Right, self.right),
        ]
        .into_iter()
        .filter(move |(_, depth)| *depth == min)
        .map(|(side, _)| side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.overlap(&b).is_none());
    }

    #[test]
    fn test_overlap_depths() {
        // Mover sinking 2 units into the top of a platform
        let player = Aabb::new(50.0, 0.0, 40.0, 60.0);
        let platform = Aabb::new(0.0, 58.0, 200.0, 40.0);
        let o = player.overlap(&platform).unwrap();
        assert_eq!(o.top, 2.0);
        assert_eq!(o.bottom, 98.0);
        assert_eq!(o.left, 90.0);
        assert_eq!(o.right, 150.0);
        assert_eq!(o.min_sides().collect::<Vec<_>>(), vec![Side::Top]);
    }

    #[test]
    fn test_min_sides_tie_keeps_priority_order() {
        let o = Overlap {
            top: 3.0,
            bottom: 10.0,
            left: 3.0,
            right: 10.0,
        };
        assert_eq!(o.min_sides().collect::<Vec<_>>(), vec![Side::Top, Side::Left]);
    }

    #[test]
    fn test_contains_point_inclusive() {
        let b = Aabb::new(0.0, 560.0, 800.0, 40.0);
        assert!(b.contains_point(Vec2::new(50.0, 560.0)));
        assert!(b.contains_point(Vec2::new(800.0, 600.0)));
        assert!(!b.contains_point(Vec2::new(50.0, 559.9)));
    }
}
