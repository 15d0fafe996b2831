use geo::Coord;

use super::{Outline, Paint, Shape, ShapeKind};
use crate::projection::{project_coords, Projection};
use crate::style::colors;
use crate::surface::DrawingSurface;

/// Rivers, streams and canals; filled when built from a water-body polygon
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Waterway;

impl Waterway {
    pub const DRAW_PRIORITY: i32 = 40;
}

impl Paint for Waterway {
    fn draw_priority(&self) -> i32 {
        Self::DRAW_PRIORITY
    }

    fn paint(&self, outline: Outline<'_>, surface: &mut dyn DrawingSurface) {
        outline.stroke_or_fill(surface, 1.2, colors::water());
    }
}

impl Shape {
    pub fn waterway<P>(coords: &[Coord<f64>], is_filled_area: bool, projection: &P) -> Self
    where
        P: Projection + ?Sized,
    {
        Self::from_projected(
            ShapeKind::Waterway(Waterway),
            is_filled_area,
            project_coords(coords, projection),
        )
    }
}
