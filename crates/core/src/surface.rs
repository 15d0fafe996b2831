//! The drawing-surface seam.
//!
//! Shapes only ever talk to a [`DrawingSurface`]; the rasterizer behind it
//! lives with the driver. [`DisplayList`] records the calls instead of
//! drawing them.

use geo::Coord;

use crate::style::{Color, FontSpec, Stroke};

pub trait DrawingSurface {
    /// Strokes an open polyline through `points`
    fn stroke_polyline(&mut self, points: &[Coord<f64>], stroke: &Stroke);

    /// Fills the polygon outlined by `points`
    fn fill_polygon(&mut self, points: &[Coord<f64>], color: Color);

    /// Draws `text` with its top-left corner at `position`
    fn draw_text(&mut self, text: &str, position: Coord<f64>, font: &FontSpec, color: Color);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Stroke {
        points: Vec<Coord<f64>>,
        stroke: Stroke,
    },
    Fill {
        points: Vec<Coord<f64>>,
        color: Color,
    },
    Text {
        text: String,
        position: Coord<f64>,
        font: FontSpec,
        color: Color,
    },
}

#[derive(Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Command counts as (strokes, fills, texts)
    pub fn counts(&self) -> (usize, usize, usize) {
        self.commands
            .iter()
            .fold((0, 0, 0), |(s, f, t), cmd| match cmd {
                DrawCommand::Stroke { .. } => (s + 1, f, t),
                DrawCommand::Fill { .. } => (s, f + 1, t),
                DrawCommand::Text { .. } => (s, f, t + 1),
            })
    }
}

impl DrawingSurface for DisplayList {
    fn stroke_polyline(&mut self, points: &[Coord<f64>], stroke: &Stroke) {
        self.commands.push(DrawCommand::Stroke {
            points: points.to_vec(),
            stroke: stroke.clone(),
        });
    }

    fn fill_polygon(&mut self, points: &[Coord<f64>], color: Color) {
        self.commands.push(DrawCommand::Fill {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: Coord<f64>, font: &FontSpec, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            font: *font,
            color,
        });
    }
}
