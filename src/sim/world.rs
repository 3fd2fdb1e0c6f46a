//! The field: one ordered collection owning every entity
//!
//! Insertion order is iteration order for signals, collisions and drawing.
//! Only the rover ever changes after setup.

use super::collision;
use super::entity::Entity;
use super::geometry::Position;
use super::signal::{Signal, signal_for};
use crate::config::FieldConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct World {
    entities: Vec<Entity>,
    rover: usize,
    target: usize,
}

impl World {
    /// Lay out obstacles (config order), then the target, then the rover
    pub fn from_config(config: &FieldConfig) -> Result<Self> {
        config.validate()?;

        let mut entities: Vec<Entity> = config
            .obstacles
            .iter()
            .map(|o| Entity::obstacle_with_radius(o.x, o.y, o.radius))
            .collect();

        let target = entities.len();
        entities.push(Entity::target_with_radius(
            config.target.x,
            config.target.y,
            config.target.radius,
        ));

        let rover = entities.len();
        entities.push(
            Entity::rover(config.rover.x, config.rover.y, config.rover.orientation)
                .with_radius(config.rover.radius),
        );

        Ok(Self {
            entities,
            rover,
            target,
        })
    }

    /// All entities in iteration order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn rover(&self) -> &Entity {
        &self.entities[self.rover]
    }

    pub fn target(&self) -> &Entity {
        &self.entities[self.target]
    }

    pub fn rover_index(&self) -> usize {
        self.rover
    }

    pub fn rover_orientation(&self) -> f64 {
        self.rover().orientation().unwrap_or(0.0)
    }

    /// Surface gap between rover and target
    pub fn target_clearance(&self) -> f64 {
        self.rover().clearance_to(self.target())
    }

    /// One signal per non-rover entity, in collection order
    pub fn signals(&self) -> Vec<Signal> {
        let rover = self.rover();
        self.entities
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != self.rover)
            .map(|(_, e)| signal_for(rover, e))
            .collect()
    }

    pub fn overlap(&self) -> bool {
        collision::overlap(&self.entities, self.rover)
    }

    pub fn first_overlap(&self) -> Option<usize> {
        collision::first_overlap(&self.entities, self.rover)
    }

    pub(crate) fn set_rover_position(&mut self, position: Position) {
        self.entities[self.rover].set_position(position);
    }

    pub(crate) fn set_rover_orientation(&mut self, orientation: f64) {
        self.entities[self.rover].set_orientation(orientation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ObstacleSpec, RoverSpec, TargetSpec};
    use crate::consts::DEFAULT_RADIUS;

    #[test]
    fn test_layout_order() {
        let world = World::from_config(&FieldConfig::default()).unwrap();
        let entities = world.entities();
        assert_eq!(entities.len(), 10);
        assert!(entities[..8].iter().all(|e| !e.is_target() && !e.is_rover()));
        assert!(entities[8].is_target());
        assert!(entities[9].is_rover());
        assert_eq!(world.rover_orientation(), 90.0);
    }

    #[test]
    fn test_signals_skip_rover_and_keep_order() {
        let world = World::from_config(&FieldConfig::default()).unwrap();
        let signals = world.signals();
        assert_eq!(signals.len(), 9);
        assert!(signals[..8].iter().all(|s| !s.is_target()));
        assert!(signals[8].is_target());
        // First obstacle at (65, 7): 65.37.. - 10 - 10
        let expected = (65.0f64.powi(2) + 49.0).sqrt() - 2.0 * DEFAULT_RADIUS;
        assert!((signals[0].distance() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_target_clearance() {
        let config = FieldConfig {
            obstacles: vec![ObstacleSpec::new(-100.0, 0.0)],
            target: TargetSpec {
                x: 200.0,
                y: 30.0,
                radius: 10.0,
            },
            rover: RoverSpec {
                x: 179.5,
                y: 30.0,
                orientation: 0.0,
                radius: 10.0,
            },
            ..FieldConfig::default()
        };
        let world = World::from_config(&config).unwrap();
        assert!((world.target_clearance() - 0.5).abs() < 1e-9);
        assert!(!world.overlap());
    }

    #[test]
    fn test_rover_updates() {
        let mut world = World::from_config(&FieldConfig::default()).unwrap();
        world.set_rover_position(Position::new(65.0, 7.0));
        world.set_rover_orientation(12.0);
        assert!(world.overlap());
        assert_eq!(world.first_overlap(), Some(0));
        assert_eq!(world.rover_orientation(), 12.0);
    }
}
