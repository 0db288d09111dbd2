//! Level data: the stack of junk the player climbs
//!
//! Obstacles are immutable once a level is loaded. Order has no meaning to
//! the physics except that the last obstacle is always the goal.

use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::error::ConfigError;

/// Visual/material type of an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceType {
    Ground,
    Sofa,
    Car,
    Tv,
    Fridge,
    Tire,
    Goal,
    #[default]
    #[serde(other)]
    Junk,
}

/// A static rectangular obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(rename = "type", default)]
    pub surface: SurfaceType,
    /// Sliding friction override when landed upon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction: Option<f32>,
    /// Restitution override for non-top hits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounce: Option<f32>,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, width: f32, height: f32, surface: SurfaceType) -> Self {
        Self {
            x,
            y,
            width,
            height,
            surface,
            friction: None,
            bounce: None,
        }
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = Some(friction);
        self
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = Some(bounce);
        self
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    /// Restitution applied when struck from the bottom or a side
    #[inline]
    pub fn restitution(&self, default_bounce: f32) -> f32 {
        self.bounce.unwrap_or(default_bounce)
    }
}

/// Accepted JSON shapes for a level file
#[derive(Deserialize)]
#[serde(untagged)]
enum LevelFile {
    Bare(Vec<Obstacle>),
    Wrapped { obstacles: Vec<Obstacle> },
}

impl TryFrom<LevelFile> for Level {
    type Error = ConfigError;

    fn try_from(file: LevelFile) -> Result<Self, Self::Error> {
        match file {
            LevelFile::Bare(obstacles) | LevelFile::Wrapped { obstacles } => Self::new(obstacles),
        }
    }
}

/// An ordered, non-empty obstacle list whose last element is the goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LevelFile")]
pub struct Level {
    obstacles: Vec<Obstacle>,
}

impl Level {
    /// Build a level, rejecting empty or degenerate geometry
    pub fn new(obstacles: Vec<Obstacle>) -> Result<Self, ConfigError> {
        if obstacles.is_empty() {
            return Err(ConfigError::Invalid(
                "level needs at least a goal obstacle".to_string(),
            ));
        }
        for (i, o) in obstacles.iter().enumerate() {
            let finite = [o.x, o.y, o.width, o.height].iter().all(|v| v.is_finite());
            if !finite || o.width <= 0.0 || o.height <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "obstacle {i} has invalid geometry"
                )));
            }
        }
        Ok(Self { obstacles })
    }

    /// Parse a level from a JSON array of obstacles or `{ "obstacles": [...] }`
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: LevelFile = serde_json::from_str(json)?;
        let level = Self::try_from(file)?;
        log::info!("Loaded level with {} obstacles", level.len());
        Ok(level)
    }

    /// The junk pile: ground, six pieces of junk, goal in the top-right
    pub fn junk_pile(world_width: f32, world_height: f32) -> Self {
        let h = world_height;
        let w = world_width;
        Self {
            obstacles: vec![
                Obstacle::new(0.0, h - 40.0, w, 40.0, SurfaceType::Ground).with_friction(0.98),
                // Tutorial section
                Obstacle::new(120.0, h - 100.0, 80.0, 30.0, SurfaceType::Sofa),
                Obstacle::new(240.0, h - 150.0, 100.0, 40.0, SurfaceType::Car),
                // Middle section
                Obstacle::new(370.0, h - 200.0, 60.0, 25.0, SurfaceType::Tv),
                Obstacle::new(450.0, h - 250.0, 70.0, 60.0, SurfaceType::Fridge)
                    .with_friction(0.92),
                // Challenging jumps
                Obstacle::new(560.0, h - 320.0, 50.0, 20.0, SurfaceType::Tire).with_bounce(0.4),
                Obstacle::new(650.0, h - 380.0, 120.0, 30.0, SurfaceType::Car),
                Obstacle::new(w - 50.0, h - 450.0, 50.0, 50.0, SurfaceType::Goal)
                    .with_friction(1.0),
            ],
        }
    }

    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Index of the goal obstacle
    #[inline]
    pub fn goal_index(&self) -> usize {
        self.obstacles.len() - 1
    }

    /// The goal obstacle (always the last one)
    #[inline]
    pub fn goal(&self) -> &Obstacle {
        &self.obstacles[self.goal_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_junk_pile_layout() {
        let level = Level::junk_pile(800.0, 600.0);
        assert_eq!(level.len(), 8);
        assert_eq!(level.obstacles()[0].surface, SurfaceType::Ground);
        assert_eq!(level.obstacles()[0].y, 560.0);
        assert_eq!(level.goal().surface, SurfaceType::Goal);
        assert_eq!(level.goal().x, 750.0);
        assert_eq!(level.goal().y, 150.0);
        assert_eq!(level.obstacles()[5].bounce, Some(0.4));
    }

    #[test]
    fn test_restitution_override() {
        let tire = Obstacle::new(0.0, 0.0, 10.0, 10.0, SurfaceType::Tire).with_bounce(0.4);
        let sofa = Obstacle::new(0.0, 0.0, 10.0, 10.0, SurfaceType::Sofa);
        assert_eq!(tire.restitution(0.3), 0.4);
        assert_eq!(sofa.restitution(0.3), 0.3);
    }

    #[test]
    fn test_from_json_shapes() {
        let bare = r#"[
            { "x": 0, "y": 560, "width": 800, "height": 40, "type": "ground", "friction": 0.98 },
            { "x": 750, "y": 150, "width": 50, "height": 50, "type": "goal" }
        ]"#;
        let level = Level::from_json(bare).unwrap();
        assert_eq!(level.len(), 2);
        assert_eq!(level.obstacles()[0].friction, Some(0.98));

        let wrapped = r#"{ "obstacles": [
            { "x": 10, "y": 10, "width": 5, "height": 5, "type": "washing_machine" }
        ] }"#;
        let level = Level::from_json(wrapped).unwrap();
        assert_eq!(level.goal().surface, SurfaceType::Junk);
    }

    #[test]
    fn test_rejects_empty_and_degenerate() {
        assert!(matches!(
            Level::from_json("[]"),
            Err(ConfigError::Invalid(_))
        ));
        let flat = vec![Obstacle::new(0.0, 0.0, 10.0, 0.0, SurfaceType::Junk)];
        assert!(Level::new(flat).is_err());
    }
}
