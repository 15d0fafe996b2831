use geo::Coord;

use super::{Outline, Paint, Shape, ShapeKind};
use crate::projection::{project_coords, Projection};
use crate::style::{colors, Stroke};
use crate::surface::DrawingSurface;

/// Road line with a casing underneath
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Road;

impl Road {
    pub const DRAW_PRIORITY: i32 = 50;
}

impl Paint for Road {
    fn draw_priority(&self) -> i32 {
        Self::DRAW_PRIORITY
    }

    fn paint(&self, outline: Outline<'_>, surface: &mut dyn DrawingSurface) {
        // Area roads (squares, platforms) are not drawn
        if outline.is_filled_area {
            return;
        }
        outline.stroke(surface, &Stroke::solid(2.2, colors::road_casing()));
        outline.stroke(surface, &Stroke::solid(2.0, colors::road()));
    }
}

impl Shape {
    pub fn road<P>(coords: &[Coord<f64>], is_filled_area: bool, projection: &P) -> Self
    where
        P: Projection + ?Sized,
    {
        Self::from_projected(ShapeKind::Road(Road), is_filled_area, project_coords(coords, projection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DisplayList, DrawCommand};

    fn segment() -> Vec<Coord<f64>> {
        vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 3.0, y: 4.0 }]
    }

    #[test]
    fn test_casing_then_inner() {
        let shape = Shape::road(&segment(), false, &|c: Coord<f64>| c);
        assert_eq!(shape.draw_priority(), 50);

        let mut surface = DisplayList::new();
        shape.render(&mut surface);

        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::Stroke {
                    points: segment(),
                    stroke: Stroke::solid(2.2, colors::road_casing()),
                },
                DrawCommand::Stroke {
                    points: segment(),
                    stroke: Stroke::solid(2.0, colors::road()),
                },
            ]
        );
    }

    #[test]
    fn test_area_road_is_not_drawn() {
        let shape = Shape::road(&segment(), true, &|c: Coord<f64>| c);
        let mut surface = DisplayList::new();
        shape.render(&mut surface);
        assert!(surface.commands().is_empty());
    }
}
