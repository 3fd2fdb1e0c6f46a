//! Render adapters
//!
//! The simulation only asks for "draw these entities" and "show the end
//! banner". How that turns into output is up to the adapter.

pub mod ascii;
pub mod shapes;

pub use ascii::AsciiRenderer;
pub use shapes::{DrawCommand, Viewport, draw_commands, frame_commands};

use crate::sim::Entity;

pub trait Renderer {
    /// Draw every entity at its current state, in collection order
    fn render_frame(&mut self, entities: &[Entity]);

    /// Overlay the terminal banner on the last frame
    fn render_banner(&mut self, text: &str);

    /// Whether the host wants the run to stop (window closed, output gone)
    fn cancel_requested(&mut self) -> bool {
        false
    }

    /// Release display resources before the process exits
    fn release(&mut self) {}
}

/// Renderer that draws nothing, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_frame(&mut self, _entities: &[Entity]) {}

    fn render_banner(&mut self, text: &str) {
        log::info!("{text}");
    }
}
