//! Renderable shapes.
//!
//! A [`Shape`] owns its projected points, a filled-area flag fixed at
//! construction, and a [`ShapeKind`] carrying the variant-specific data and
//! styling. Every variant has its own module with constructors and a
//! [`Paint`] implementation.

use geo::Coord;

use crate::error::{Result, TileError};
use crate::style::{Color, FontSpec, Stroke};
use crate::surface::DrawingSurface;
use crate::viewport::Viewport;

pub mod border;
pub mod geo_feature;
pub mod populated_place;
pub mod railway;
pub mod road;
pub mod waterway;

pub use border::Border;
pub use geo_feature::{GeoFeature, GeoFeatureKind};
pub use populated_place::PopulatedPlace;
pub use railway::Railway;
pub use road::Road;
pub use waterway::Waterway;

/// Variant-specific styling
pub trait Paint {
    fn draw_priority(&self) -> i32;
    fn paint(&self, outline: Outline<'_>, surface: &mut dyn DrawingSurface);
}

/// Read-only view of a shape's geometry handed to [`Paint::paint`].
///
/// The drawing helpers skip geometry the primitive cannot draw, so surfaces
/// never see a one-point polyline or a two-point polygon.
#[derive(Clone, Copy)]
pub struct Outline<'a> {
    pub points: &'a [Coord<f64>],
    pub is_filled_area: bool,
}

impl Outline<'_> {
    pub fn stroke(&self, surface: &mut dyn DrawingSurface, stroke: &Stroke) {
        if self.points.len() >= 2 {
            surface.stroke_polyline(self.points, stroke);
        }
    }

    pub fn fill(&self, surface: &mut dyn DrawingSurface, color: Color) {
        if self.points.len() >= 3 {
            surface.fill_polygon(self.points, color);
        }
    }

    /// Strokes open lines, fills areas
    pub fn stroke_or_fill(&self, surface: &mut dyn DrawingSurface, width: f32, color: Color) {
        if self.is_filled_area {
            self.fill(surface, color);
        } else {
            self.stroke(surface, &Stroke::solid(width, color));
        }
    }

    /// Draws `text` anchored at the first point
    pub fn text(&self, surface: &mut dyn DrawingSurface, text: &str, font: &FontSpec, color: Color) {
        if let Some(&anchor) = self.points.first() {
            surface.draw_text(text, anchor, font, color);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    GeoFeature(GeoFeature),
    Railway(Railway),
    PopulatedPlace(PopulatedPlace),
    Border(Border),
    Waterway(Waterway),
    Road(Road),
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::GeoFeature(_) => "geo_feature",
            ShapeKind::Railway(_) => "railway",
            ShapeKind::PopulatedPlace(_) => "populated_place",
            ShapeKind::Border(_) => "border",
            ShapeKind::Waterway(_) => "waterway",
            ShapeKind::Road(_) => "road",
        }
    }

    fn style(&self) -> &dyn Paint {
        match self {
            ShapeKind::GeoFeature(s) => s,
            ShapeKind::Railway(s) => s,
            ShapeKind::PopulatedPlace(s) => s,
            ShapeKind::Border(s) => s,
            ShapeKind::Waterway(s) => s,
            ShapeKind::Road(s) => s,
        }
    }
}

/// Which plane a shape's points currently live in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSpace {
    Projected,
    Pixel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    is_filled_area: bool,
    points: Vec<Coord<f64>>,
    space: CoordinateSpace,
}

impl Shape {
    pub(crate) fn from_projected(kind: ShapeKind, is_filled_area: bool, points: Vec<Coord<f64>>) -> Self {
        Self {
            kind,
            is_filled_area,
            points,
            space: CoordinateSpace::Projected,
        }
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Paint order; higher paints later (on top)
    pub fn draw_priority(&self) -> i32 {
        self.kind.style().draw_priority()
    }

    pub fn is_filled_area(&self) -> bool {
        self.is_filled_area
    }

    pub fn points(&self) -> &[Coord<f64>] {
        &self.points
    }

    pub fn space(&self) -> CoordinateSpace {
        self.space
    }

    /// Moves the points from the projected plane into tile pixels.
    ///
    /// Only allowed once per shape; a second call fails and leaves the points
    /// untouched.
    pub fn apply_viewport(&mut self, viewport: &Viewport) -> Result<()> {
        if self.space == CoordinateSpace::Pixel {
            return Err(TileError::AlreadyTransformed);
        }
        viewport.apply(&mut self.points);
        self.space = CoordinateSpace::Pixel;
        Ok(())
    }

    pub fn render(&self, surface: &mut dyn DrawingSurface) {
        let outline = Outline {
            points: &self.points,
            is_filled_area: self.is_filled_area,
        };
        self.kind.style().paint(outline, surface);
    }
}
