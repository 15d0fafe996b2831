use geo::Coord;

use super::{Outline, Paint, Shape, ShapeKind};
use crate::projection::{project_coords, Projection};
use crate::style::{colors, Stroke};
use crate::surface::DrawingSurface;

/// National boundary line
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Border;

impl Border {
    pub const DRAW_PRIORITY: i32 = 30;
}

impl Paint for Border {
    fn draw_priority(&self) -> i32 {
        Self::DRAW_PRIORITY
    }

    fn paint(&self, outline: Outline<'_>, surface: &mut dyn DrawingSurface) {
        outline.stroke(surface, &Stroke::solid(2.0, colors::border()));
    }
}

impl Shape {
    pub fn border<P>(coords: &[Coord<f64>], projection: &P) -> Self
    where
        P: Projection + ?Sized,
    {
        Self::from_projected(ShapeKind::Border(Border), false, project_coords(coords, projection))
    }
}
