//! Feature → shape classification.
//!
//! Every feature maps to exactly one shape. Gates run in a fixed order
//! because a feature can textually satisfy several of them:
//!
//! 1. national border (`boundary=administrative*` + `admin_level=2`)
//! 2. populated place (point with `place*=city|town|locality|hamlet*`)
//! 3. the first matching [`Taxonomy`] rule
//! 4. a generic feature classified by its `natural` tag

use crate::feature::{GeometryKind, RawFeature, Tags};
use crate::projection::Projection;
use crate::shape::{GeoFeatureKind, Shape};

pub mod taxonomy;

use taxonomy::{Target, Taxonomy};

const PLACE_PREFIXES: [&str; 4] = ["city", "town", "locality", "hamlet"];

/// Check if a feature is a national (admin level 2) boundary
pub fn should_be_border(feature: &RawFeature) -> bool {
    let mut found_boundary = false;
    let mut found_level = false;

    for (key, value) in feature.tags.iter() {
        if key.starts_with("boundary") && value.starts_with("administrative") {
            found_boundary = true;
        }
        if key.starts_with("admin_level") && value == "2" {
            found_level = true;
        }
        if found_boundary && found_level {
            break;
        }
    }

    found_boundary && found_level
}

/// Check if a feature is a labelled settlement point
pub fn should_be_populated_place(feature: &RawFeature) -> bool {
    if feature.geometry != GeometryKind::Point {
        return false;
    }

    feature.tags.any(|key, value| {
        key.starts_with("place") && PLACE_PREFIXES.iter().any(|prefix| value.starts_with(prefix))
    })
}

/// Sub-type from the `natural` tag; first matching group wins
pub fn natural_kind(tags: &Tags) -> GeoFeatureKind {
    let Some(natural) = tags.first_value("natural") else {
        return GeoFeatureKind::Unknown;
    };

    match natural {
        "water" => GeoFeatureKind::Water,
        "wood" | "tree_row" => GeoFeatureKind::Forest,
        "beach" | "sand" => GeoFeatureKind::Desert,
        "bare_rock" | "rock" | "scree" => GeoFeatureKind::Mountains,
        _ => GeoFeatureKind::Plain,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    taxonomy: Taxonomy,
}

impl Classifier {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn classify<P>(&self, feature: &RawFeature, projection: &P) -> Shape
    where
        P: Projection + ?Sized,
    {
        if should_be_border(feature) {
            return Shape::border(&feature.coords, projection);
        }
        if should_be_populated_place(feature) {
            return Shape::populated_place(feature, projection);
        }

        let polygon = feature.is_polygon();
        match self.taxonomy.target_for(&feature.tags) {
            Some(Target::Road) => Shape::road(&feature.coords, polygon, projection),
            Some(Target::Railway) => Shape::railway(&feature.coords, projection),
            Some(Target::Waterway) => Shape::waterway(&feature.coords, polygon, projection),
            Some(Target::GeoFeature { kind: Some(kind) }) => {
                Shape::geo_feature_as(feature, *kind, projection)
            }
            Some(Target::GeoFeature { kind: None }) | None => {
                Shape::geo_feature_from(feature, projection)
            }
        }
    }

    pub fn classify_all<'a, P>(
        &self,
        features: impl IntoIterator<Item = &'a RawFeature>,
        projection: &P,
    ) -> Vec<Shape>
    where
        P: Projection + ?Sized,
    {
        let shapes: Vec<Shape> = features
            .into_iter()
            .map(|feature| {
                let shape = self.classify(feature, projection);
                log::trace!(
                    "{:?} with {} tags -> {} (priority {})",
                    feature.geometry,
                    feature.tags.len(),
                    shape.kind().name(),
                    shape.draw_priority()
                );
                shape
            })
            .collect();

        log::debug!("Classified {} features", shapes.len());
        shapes
    }
}
