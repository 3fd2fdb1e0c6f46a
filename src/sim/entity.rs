//! Field entities: obstacles, the target and the rover

use serde::{Deserialize, Serialize};

use super::geometry::Position;
use crate::consts::DEFAULT_RADIUS;

/// Display color of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Black,
}

/// What an entity is, plus the state only that variant carries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    Target,
    /// Heading in degrees, counter-clockwise from +x
    Rover { orientation: f64 },
}

/// A circular object in the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub position: Position,
    pub radius: f64,
    pub kind: EntityKind,
}

impl Entity {
    pub fn obstacle(x: f64, y: f64) -> Self {
        Self::obstacle_with_radius(x, y, DEFAULT_RADIUS)
    }

    pub fn obstacle_with_radius(x: f64, y: f64, radius: f64) -> Self {
        Self {
            position: Position::new(x, y),
            radius,
            kind: EntityKind::Obstacle,
        }
    }

    pub fn target(x: f64, y: f64) -> Self {
        Self::target_with_radius(x, y, DEFAULT_RADIUS)
    }

    pub fn target_with_radius(x: f64, y: f64, radius: f64) -> Self {
        Self {
            position: Position::new(x, y),
            radius,
            kind: EntityKind::Target,
        }
    }

    pub fn rover(x: f64, y: f64, orientation: f64) -> Self {
        Self {
            position: Position::new(x, y),
            radius: DEFAULT_RADIUS,
            kind: EntityKind::Rover { orientation },
        }
    }

    /// Override the radius fixed at construction
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    #[inline]
    pub fn is_target(&self) -> bool {
        matches!(self.kind, EntityKind::Target)
    }

    #[inline]
    pub fn is_rover(&self) -> bool {
        matches!(self.kind, EntityKind::Rover { .. })
    }

    /// Rover heading; `None` for immovable entities
    pub fn orientation(&self) -> Option<f64> {
        match self.kind {
            EntityKind::Rover { orientation } => Some(orientation),
            _ => None,
        }
    }

    pub fn color(&self) -> Color {
        match self.kind {
            EntityKind::Obstacle => Color::Red,
            EntityKind::Target => Color::Blue,
            EntityKind::Rover { .. } => Color::Yellow,
        }
    }

    /// Gap between the two surfaces; negative when they overlap
    #[inline]
    pub fn clearance_to(&self, other: &Entity) -> f64 {
        self.position.distance(other.position) - self.radius - other.radius
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// No-op on anything but the rover
    pub(crate) fn set_orientation(&mut self, heading: f64) {
        if let EntityKind::Rover { orientation } = &mut self.kind {
            *orientation = heading;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert!(!Entity::obstacle(0.0, 0.0).is_target());
        assert!(Entity::target(0.0, 0.0).is_target());
        assert!(!Entity::rover(0.0, 0.0, 90.0).is_target());
        assert!(Entity::rover(0.0, 0.0, 90.0).is_rover());
    }

    #[test]
    fn test_default_and_overridden_radius() {
        assert_eq!(Entity::obstacle(1.0, 2.0).radius, DEFAULT_RADIUS);
        assert_eq!(Entity::obstacle_with_radius(1.0, 2.0, 25.0).radius, 25.0);
        assert_eq!(Entity::rover(0.0, 0.0, 0.0).with_radius(4.0).radius, 4.0);
    }

    #[test]
    fn test_orientation_only_on_rover() {
        let mut rover = Entity::rover(0.0, 0.0, 90.0);
        rover.set_orientation(45.0);
        assert_eq!(rover.orientation(), Some(45.0));

        let mut obstacle = Entity::obstacle(0.0, 0.0);
        obstacle.set_orientation(45.0);
        assert_eq!(obstacle.orientation(), None);
        assert_eq!(obstacle.kind, EntityKind::Obstacle);
    }

    #[test]
    fn test_clearance() {
        let rover = Entity::rover(0.0, 0.0, 0.0);
        assert!((rover.clearance_to(&Entity::obstacle(15.0, 0.0)) + 5.0).abs() < 1e-12);
        assert!((rover.clearance_to(&Entity::obstacle(25.0, 0.0)) - 5.0).abs() < 1e-12);
    }
}
