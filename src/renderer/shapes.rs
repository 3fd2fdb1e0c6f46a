//! Shape generation for field entities
//!
//! Entities describe themselves in field coordinates (y up). The flip to
//! screen coordinates (y down, origin at the viewport centre) happens only
//! in [`Viewport::to_screen`].

use glam::DVec2;

use crate::sim::{Color, Entity, EntityKind, Position};

/// A primitive in field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Filled circle
    Disc {
        center: Position,
        radius: f64,
        color: Color,
    },
    /// Straight line between two points
    Segment {
        from: Position,
        to: Position,
        color: Color,
    },
}

/// Primitives for one entity, back to front
pub fn draw_commands(entity: &Entity) -> Vec<DrawCommand> {
    let mut commands = vec![DrawCommand::Disc {
        center: entity.position,
        radius: entity.radius,
        color: entity.color(),
    }];

    if let EntityKind::Rover { orientation } = entity.kind {
        // Heading indicator from centre to the rim
        commands.push(DrawCommand::Segment {
            from: entity.position,
            to: entity.position.offset(orientation, entity.radius),
            color: Color::Black,
        });
    }

    commands
}

/// Primitives for a whole frame, in collection order
pub fn frame_commands(entities: &[Entity]) -> Vec<DrawCommand> {
    entities.iter().flat_map(draw_commands).collect()
}

/// Display surface size in field units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
        }
    }
}

impl Viewport {
    /// Field point to screen point: origin moved to the centre, y inverted
    #[inline]
    pub fn to_screen(&self, p: Position) -> DVec2 {
        DVec2::new(p.x + self.width / 2.0, self.height / 2.0 - p.y)
    }

    /// Inverse of [`Viewport::to_screen`]
    #[inline]
    pub fn to_field(&self, s: DVec2) -> Position {
        Position::new(s.x - self.width / 2.0, self.height / 2.0 - s.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_is_single_disc() {
        let commands = draw_commands(&Entity::obstacle_with_radius(5.0, 6.0, 15.0));
        assert_eq!(
            commands,
            vec![DrawCommand::Disc {
                center: Position::new(5.0, 6.0),
                radius: 15.0,
                color: Color::Red,
            }]
        );
    }

    #[test]
    fn test_rover_has_heading_segment() {
        let commands = draw_commands(&Entity::rover(0.0, 0.0, 90.0));
        assert_eq!(commands.len(), 2);
        match commands[1] {
            DrawCommand::Segment { from, to, color } => {
                assert_eq!(from, Position::ORIGIN);
                assert!(to.x.abs() < 1e-9);
                assert!((to.y - 10.0).abs() < 1e-9);
                assert_eq!(color, Color::Black);
            }
            other => panic!("expected heading segment, got {other:?}"),
        }
    }

    #[test]
    fn test_frame_keeps_order() {
        let entities = vec![
            Entity::target(1.0, 1.0),
            Entity::obstacle(2.0, 2.0),
            Entity::rover(0.0, 0.0, 0.0),
        ];
        let commands = frame_commands(&entities);
        assert_eq!(commands.len(), 4);
        assert!(matches!(commands[0], DrawCommand::Disc { color: Color::Blue, .. }));
        assert!(matches!(commands[1], DrawCommand::Disc { color: Color::Red, .. }));
        assert!(matches!(commands[2], DrawCommand::Disc { color: Color::Yellow, .. }));
    }

    #[test]
    fn test_screen_flip() {
        let viewport = Viewport::default();
        let s = viewport.to_screen(Position::new(10.0, 20.0));
        assert_eq!(s, DVec2::new(310.0, 180.0));
        assert_eq!(viewport.to_field(s), Position::new(10.0, 20.0));
    }
}
