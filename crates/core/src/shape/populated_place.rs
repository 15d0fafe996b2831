use super::{Outline, Paint, Shape, ShapeKind};
use crate::feature::RawFeature;
use crate::projection::{project_coords, Projection};
use crate::style::{colors, FontSpec};
use crate::surface::DrawingSurface;

const LABEL_SIZE: f32 = 12.0;
const UNKNOWN_NAME: &str = "Unknown";

/// City, town, locality or hamlet label
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedPlace {
    pub name: String,
    pub should_render: bool,
}

impl PopulatedPlace {
    pub const DRAW_PRIORITY: i32 = 60;

    /// Without a label the place stays invisible, whatever its `name` tag
    /// says. With one, a non-blank `name` tag takes precedence over it.
    pub fn from_feature(feature: &RawFeature) -> Self {
        let Some(label) = feature.label() else {
            return Self {
                name: UNKNOWN_NAME.to_string(),
                should_render: false,
            };
        };

        let name = feature
            .tags
            .first_value("name")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(label);

        Self {
            name: name.to_string(),
            should_render: true,
        }
    }
}

impl Paint for PopulatedPlace {
    fn draw_priority(&self) -> i32 {
        Self::DRAW_PRIORITY
    }

    fn paint(&self, outline: Outline<'_>, surface: &mut dyn DrawingSurface) {
        if !self.should_render {
            return;
        }
        outline.text(surface, &self.name, &FontSpec::bold(LABEL_SIZE), colors::label());
    }
}

impl Shape {
    pub fn populated_place<P>(feature: &RawFeature, projection: &P) -> Self
    where
        P: Projection + ?Sized,
    {
        Self::from_projected(
            ShapeKind::PopulatedPlace(PopulatedPlace::from_feature(feature)),
            false,
            project_coords(&feature.coords, projection),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{GeometryKind, Tags};
    use crate::surface::{DisplayList, DrawCommand};
    use geo::Coord;

    fn place(tags: &[(&str, &str)]) -> RawFeature {
        RawFeature::new(
            GeometryKind::Point,
            vec![Coord { x: 7.0, y: 3.0 }],
            Tags::from_pairs(tags.iter().copied()),
        )
    }

    #[test]
    fn test_empty_label_hides_place() {
        let feature = place(&[("place", "town"), ("name", "Springfield")]);
        let place = PopulatedPlace::from_feature(&feature);
        assert_eq!(place.name, "Unknown");
        assert!(!place.should_render);

        let place = PopulatedPlace::from_feature(&feature.with_label(""));
        assert_eq!(place.name, "Unknown");
        assert!(!place.should_render);
    }

    #[test]
    fn test_name_tag_beats_label() {
        let feature = place(&[("place", "city"), ("name", "Springfield")]).with_label("Shelbyville");
        let place = PopulatedPlace::from_feature(&feature);
        assert_eq!(place.name, "Springfield");
        assert!(place.should_render);
    }

    #[test]
    fn test_blank_name_falls_back_to_label() {
        let feature = place(&[("place", "city"), ("name", "   ")]).with_label("Shelbyville");
        assert_eq!(PopulatedPlace::from_feature(&feature).name, "Shelbyville");

        let feature = place(&[("place", "city")]).with_label("Ogdenville");
        assert_eq!(PopulatedPlace::from_feature(&feature).name, "Ogdenville");
    }

    #[test]
    fn test_render_text_at_first_point() {
        let feature = place(&[("place", "city")]).with_label("Capital City");
        let shape = Shape::populated_place(&feature, &|c: Coord<f64>| c);
        assert_eq!(shape.draw_priority(), 60);
        assert!(!shape.is_filled_area());

        let mut surface = DisplayList::new();
        shape.render(&mut surface);

        assert_eq!(
            surface.commands(),
            &[DrawCommand::Text {
                text: "Capital City".to_string(),
                position: Coord { x: 7.0, y: 3.0 },
                font: FontSpec::bold(12.0),
                color: colors::label(),
            }]
        );
    }

    #[test]
    fn test_hidden_place_draws_nothing() {
        let shape = Shape::populated_place(&place(&[("place", "city")]), &|c: Coord<f64>| c);
        let mut surface = DisplayList::new();
        shape.render(&mut surface);
        assert!(surface.commands().is_empty());
    }
}
