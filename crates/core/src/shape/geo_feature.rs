use geo::Coord;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{Outline, Paint, Shape, ShapeKind};
use crate::classify::natural_kind;
use crate::feature::RawFeature;
use crate::projection::{project_coords, Projection};
use crate::style::{colors, Color};
use crate::surface::DrawingSurface;

const LINE_WIDTH: f32 = 1.2;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GeoFeatureKind {
    Plain,
    Hills,
    Mountains,
    Forest,
    Desert,
    Unknown,
    Water,
    Residential,
}

impl GeoFeatureKind {
    pub fn draw_priority(self) -> i32 {
        match self {
            GeoFeatureKind::Desert => 9,
            GeoFeatureKind::Unknown => 8,
            GeoFeatureKind::Plain => 10,
            GeoFeatureKind::Forest => 11,
            GeoFeatureKind::Hills => 12,
            GeoFeatureKind::Mountains => 13,
            GeoFeatureKind::Water => 40,
            GeoFeatureKind::Residential => 41,
        }
    }

    pub fn color(self) -> Color {
        match self {
            GeoFeatureKind::Plain => colors::plain(),
            GeoFeatureKind::Hills => colors::hills(),
            GeoFeatureKind::Mountains => colors::mountains(),
            GeoFeatureKind::Forest => colors::forest(),
            GeoFeatureKind::Desert => colors::desert(),
            GeoFeatureKind::Unknown => colors::unknown(),
            GeoFeatureKind::Water => colors::water(),
            GeoFeatureKind::Residential => colors::residential(),
        }
    }
}

/// Land cover, water bodies and anything else that falls through the more
/// specific variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFeature {
    pub kind: GeoFeatureKind,
}

impl GeoFeature {
    pub fn new(kind: GeoFeatureKind) -> Self {
        Self { kind }
    }
}

impl Paint for GeoFeature {
    fn draw_priority(&self) -> i32 {
        self.kind.draw_priority()
    }

    fn paint(&self, outline: Outline<'_>, surface: &mut dyn DrawingSurface) {
        outline.stroke_or_fill(surface, LINE_WIDTH, self.kind.color());
    }
}

impl Shape {
    /// A decorative area of a known kind, always filled
    pub fn geo_feature<P>(coords: &[Coord<f64>], kind: GeoFeatureKind, projection: &P) -> Self
    where
        P: Projection + ?Sized,
    {
        Self::from_projected(
            ShapeKind::GeoFeature(GeoFeature::new(kind)),
            true,
            project_coords(coords, projection),
        )
    }

    /// Classifies the feature by its `natural` tag
    pub fn geo_feature_from<P>(feature: &RawFeature, projection: &P) -> Self
    where
        P: Projection + ?Sized,
    {
        Self::geo_feature_as(feature, natural_kind(&feature.tags), projection)
    }

    /// Builds a generic feature with an explicit kind, filled iff the source
    /// geometry is a polygon
    pub fn geo_feature_as<P>(feature: &RawFeature, kind: GeoFeatureKind, projection: &P) -> Self
    where
        P: Projection + ?Sized,
    {
        Self::from_projected(
            ShapeKind::GeoFeature(GeoFeature::new(kind)),
            feature.is_polygon(),
            project_coords(&feature.coords, projection),
        )
    }
}
