use geo::Coord;

use super::{Outline, Paint, Shape, ShapeKind};
use crate::projection::{project_coords, Projection};
use crate::style::{colors, Stroke};
use crate::surface::DrawingSurface;

const TIE_DASHES: [f32; 3] = [2.0, 4.0, 2.0];

/// Rail line drawn as a dark bed with light dashed ties on top
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Railway;

impl Railway {
    pub const DRAW_PRIORITY: i32 = 45;
}

impl Paint for Railway {
    fn draw_priority(&self) -> i32 {
        Self::DRAW_PRIORITY
    }

    fn paint(&self, outline: Outline<'_>, surface: &mut dyn DrawingSurface) {
        // Bed first, ties on top
        outline.stroke(surface, &Stroke::solid(2.0, colors::rail_bed()));
        outline.stroke(surface, &Stroke::solid(1.2, colors::rail_ties()).dashed(&TIE_DASHES));
    }
}

impl Shape {
    pub fn railway<P>(coords: &[Coord<f64>], projection: &P) -> Self
    where
        P: Projection + ?Sized,
    {
        Self::from_projected(ShapeKind::Railway(Railway), false, project_coords(coords, projection))
    }
}
