//! Overlap detection between the rover and everything else
//!
//! Circles only: the clearance between two entities is the gap between their
//! surfaces, and any negative clearance is an overlap.

use super::entity::Entity;

/// Clearance between `rover` and every other entity, in collection order
pub fn clearances<'a>(
    entities: &'a [Entity],
    rover_index: usize,
) -> impl Iterator<Item = (usize, f64)> + 'a {
    let rover = &entities[rover_index];
    entities
        .iter()
        .enumerate()
        .filter(move |(i, _)| *i != rover_index)
        .map(move |(i, e)| (i, rover.clearance_to(e)))
}

/// Index of the first entity the rover currently overlaps
pub fn first_overlap(entities: &[Entity], rover_index: usize) -> Option<usize> {
    clearances(entities, rover_index)
        .find(|(_, clearance)| *clearance < 0.0)
        .map(|(i, _)| i)
}

/// Whether the rover overlaps anything at its current position
#[inline]
pub fn overlap(entities: &[Entity], rover_index: usize) -> bool {
    first_overlap(entities, rover_index).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(obstacle_x: f64) -> Vec<Entity> {
        vec![
            Entity::obstacle(obstacle_x, 0.0),
            Entity::target(200.0, 30.0),
            Entity::rover(0.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_overlap_detected() {
        let entities = field(15.0);
        assert!(overlap(&entities, 2));
        assert_eq!(first_overlap(&entities, 2), Some(0));
    }

    #[test]
    fn test_clear_field() {
        let entities = field(25.0);
        assert!(!overlap(&entities, 2));
        let gaps: Vec<_> = clearances(&entities, 2).collect();
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].0, 0);
        assert!((gaps[0].1 - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let entities = field(20.0);
        assert!(!overlap(&entities, 2));
    }

    #[test]
    fn test_rover_never_overlaps_itself() {
        let entities = vec![Entity::rover(0.0, 0.0, 0.0)];
        assert!(!overlap(&entities, 0));
    }

    #[test]
    fn test_first_of_several() {
        let entities = vec![
            Entity::obstacle(100.0, 0.0),
            Entity::rover(0.0, 0.0, 0.0),
            Entity::obstacle(0.0, 12.0),
            Entity::obstacle(-12.0, 0.0),
        ];
        assert_eq!(first_overlap(&entities, 1), Some(2));
    }
}
