//! Terminal renderer
//!
//! Rasterizes draw commands into a character grid, one cell per
//! `cell_width x cell_height` block of screen space, and writes each frame
//! to any `io::Write`. A failed write is treated as the viewer going away.

use std::io::Write;

use glam::DVec2;

use super::Renderer;
use super::shapes::{DrawCommand, Viewport, frame_commands};
use crate::sim::{Color, Entity};

/// Terminal cells are roughly twice as tall as they are wide
const DEFAULT_CELL_WIDTH: f64 = 6.0;
const DEFAULT_CELL_HEIGHT: f64 = 12.0;

const EMPTY: char = ' ';
const CLEAR_AND_HOME: &str = "\x1b[2J\x1b[H";

fn glyph(color: Color) -> char {
    match color {
        Color::Red => '#',
        Color::Blue => 'O',
        Color::Yellow => '@',
        Color::Black => '+',
    }
}

pub struct AsciiRenderer<W: Write> {
    out: W,
    viewport: Viewport,
    cell_width: f64,
    cell_height: f64,
    cols: usize,
    rows: usize,
    /// Last rasterized frame, row-major
    grid: Vec<char>,
    clear_screen: bool,
    failed: bool,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        Self::with_cell_size(out, viewport, DEFAULT_CELL_WIDTH, DEFAULT_CELL_HEIGHT)
    }

    pub fn with_cell_size(out: W, viewport: Viewport, cell_width: f64, cell_height: f64) -> Self {
        let cols = (viewport.width / cell_width).ceil().max(1.0) as usize;
        let rows = (viewport.height / cell_height).ceil().max(1.0) as usize;
        Self {
            out,
            viewport,
            cell_width,
            cell_height,
            cols,
            rows,
            grid: vec![EMPTY; cols * rows],
            clear_screen: false,
            failed: false,
        }
    }

    /// Clear the terminal before every frame so frames animate in place
    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The last rasterized frame as lines
    pub fn lines(&self) -> Vec<String> {
        self.grid
            .chunks(self.cols)
            .map(|row| row.iter().collect())
            .collect()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Screen-space centre of a cell
    fn cell_center(&self, col: usize, row: usize) -> DVec2 {
        DVec2::new(
            (col as f64 + 0.5) * self.cell_width,
            (row as f64 + 0.5) * self.cell_height,
        )
    }

    fn cell_at(&self, s: DVec2) -> Option<usize> {
        if s.x < 0.0 || s.y < 0.0 {
            return None;
        }
        let col = (s.x / self.cell_width) as usize;
        let row = (s.y / self.cell_height) as usize;
        (col < self.cols && row < self.rows).then(|| row * self.cols + col)
    }

    fn rasterize(&mut self, command: &DrawCommand) {
        match *command {
            DrawCommand::Disc {
                center,
                radius,
                color,
            } => {
                let c = self.viewport.to_screen(center);
                let g = glyph(color);
                for row in 0..self.rows {
                    for col in 0..self.cols {
                        if self.cell_center(col, row).distance(c) <= radius {
                            self.grid[row * self.cols + col] = g;
                        }
                    }
                }
                // Always mark the centre so small discs stay visible
                if let Some(i) = self.cell_at(c) {
                    self.grid[i] = g;
                }
            }
            DrawCommand::Segment { from, to, color } => {
                let a = self.viewport.to_screen(from);
                let b = self.viewport.to_screen(to);
                let steps = ((b - a).length() / self.cell_width.min(self.cell_height))
                    .ceil()
                    .max(1.0) as usize;
                let g = glyph(color);
                // Leave the start cell alone so the disc centre keeps its glyph
                let start = self.cell_at(a);
                for step in 1..=steps {
                    let p = a.lerp(b, step as f64 / steps as f64);
                    if let Some(i) = self.cell_at(p).filter(|i| Some(*i) != start) {
                        self.grid[i] = g;
                    }
                }
            }
        }
    }

    fn flush_grid(&mut self) {
        if self.failed {
            return;
        }
        let mut frame = String::with_capacity((self.cols + 1) * self.rows + CLEAR_AND_HOME.len());
        if self.clear_screen {
            frame.push_str(CLEAR_AND_HOME);
        }
        for line in self.lines() {
            frame.push_str(line.trim_end());
            frame.push('\n');
        }
        let result = self
            .out
            .write_all(frame.as_bytes())
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            log::warn!("Terminal output failed, stopping: {e}");
            self.failed = true;
        }
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn render_frame(&mut self, entities: &[Entity]) {
        self.grid.fill(EMPTY);
        for command in frame_commands(entities) {
            self.rasterize(&command);
        }
        self.flush_grid();
    }

    fn render_banner(&mut self, text: &str) {
        let row = self.rows / 2;
        let chars: Vec<char> = text.chars().take(self.cols).collect();
        let start = (self.cols - chars.len()) / 2;
        for (i, ch) in chars.into_iter().enumerate() {
            self.grid[row * self.cols + start + i] = ch;
        }
        self.flush_grid();
    }

    fn cancel_requested(&mut self) -> bool {
        self.failed
    }

    fn release(&mut self) {
        if !self.failed {
            let _ = self.out.flush();
        }
    }
}
