//! One tile render pass.
//!
//! Shapes are collected, sorted by ascending draw priority (stable, so equal
//! priorities keep insertion order), moved into pixel space exactly once and
//! rendered one after another onto a single surface.

use geo::Rect;
use hashbrown::HashMap;

use crate::error::{Result, TileError};
use crate::shape::Shape;
use crate::surface::DrawingSurface;
use crate::viewport::{extent_of, Viewport};

#[derive(Debug, Default)]
pub struct Compositor {
    shapes: Vec<Shape>,
}

/// Statistics about one compose pass
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderStats {
    pub rendered: usize,
    /// Shapes with no points at all
    pub empty: usize,
    /// Shapes left out because they were already in pixel space
    pub skipped: usize,
    pub by_kind: HashMap<&'static str, usize>,
}

impl RenderStats {
    pub fn log_summary(&self) {
        log::info!("=== Render Statistics ===");
        log::info!("Shapes rendered: {}", self.rendered);

        let mut kinds: Vec<_> = self.by_kind.iter().collect();
        kinds.sort();
        for (kind, count) in kinds {
            log::info!("  {}: {}", kind, count);
        }

        if self.empty > 0 {
            log::warn!("Shapes without points: {}", self.empty);
        }
        if self.skipped > 0 {
            log::warn!("Shapes skipped: {}", self.skipped);
        }
    }
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Projected bounding box of every shape
    pub fn extent(&self) -> Option<Rect<f64>> {
        extent_of(self.shapes.iter().flat_map(|s| s.points()))
    }

    /// Sorts, transforms and renders every shape, consuming the pass.
    ///
    /// A shape that is already in pixel space is skipped and counted; the
    /// rest of the tile still renders.
    pub fn compose(mut self, viewport: &Viewport, surface: &mut dyn DrawingSurface) -> Result<RenderStats> {
        self.shapes.sort_by_key(Shape::draw_priority);

        let mut stats = RenderStats::default();
        for mut shape in self.shapes {
            match shape.apply_viewport(viewport) {
                Ok(()) => {}
                Err(TileError::AlreadyTransformed) => {
                    log::warn!("Skipping {} shape already in pixel space", shape.kind().name());
                    stats.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            }
            shape.render(surface);

            if shape.points().is_empty() {
                stats.empty += 1;
            }
            stats.rendered += 1;
            *stats.by_kind.entry(shape.kind().name()).or_insert(0) += 1;
        }

        log::debug!("Composed {} shapes", stats.rendered);
        Ok(stats)
    }
}

impl Extend<Shape> for Compositor {
    fn extend<I: IntoIterator<Item = Shape>>(&mut self, iter: I) {
        self.shapes.extend(iter);
    }
}

impl FromIterator<Shape> for Compositor {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        Self {
            shapes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{GeometryKind, RawFeature, Tags};
    use crate::shape::GeoFeatureKind;
    use crate::surface::{DisplayList, DrawCommand};
    use geo::Coord;

    fn identity(c: Coord<f64>) -> Coord<f64> {
        c
    }

    fn segment() -> Vec<Coord<f64>> {
        vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 20.0 }]
    }

    fn triangle() -> Vec<Coord<f64>> {
        vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 10.0, y: 0.0 },
            Coord { x: 5.0, y: 5.0 },
        ]
    }

    #[test]
    fn test_sorted_by_priority() {
        let place = RawFeature::new(
            GeometryKind::Point,
            vec![Coord { x: 5.0, y: 5.0 }],
            Tags::from_pairs([("place", "city")]),
        )
        .with_label("Springfield");

        let compositor: Compositor = vec![
            Shape::populated_place(&place, &identity),
            Shape::road(&segment(), false, &identity),
            Shape::geo_feature(&triangle(), GeoFeatureKind::Mountains, &identity),
            Shape::railway(&segment(), &identity),
            Shape::geo_feature(&triangle(), GeoFeatureKind::Forest, &identity),
            Shape::geo_feature(&triangle(), GeoFeatureKind::Plain, &identity),
        ]
        .into_iter()
        .collect();

        let mut priorities: Vec<i32> = compositor.shapes().iter().map(Shape::draw_priority).collect();
        priorities.sort();
        assert_eq!(priorities, vec![10, 11, 13, 45, 50, 60]);

        let viewport = Viewport::new(0.0, 0.0, 1.0, 100.0).unwrap();
        let mut surface = DisplayList::new();
        let stats = compositor.compose(&viewport, &mut surface).unwrap();
        assert_eq!(stats.rendered, 6);

        let fills: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Fill { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(
            fills,
            vec![
                GeoFeatureKind::Plain.color(),
                GeoFeatureKind::Forest.color(),
                GeoFeatureKind::Mountains.color(),
            ]
        );

        // 3 fills, 2 rail strokes, 2 road strokes, 1 label, in that order
        assert_eq!(surface.commands().len(), 8);
        assert!(matches!(surface.commands().last(), Some(DrawCommand::Text { .. })));
    }

    #[test]
    fn test_each_shape_transformed_once() {
        let compositor: Compositor = vec![
            Shape::border(&segment(), &identity),
            Shape::border(&segment(), &identity),
        ]
        .into_iter()
        .collect();

        let viewport = Viewport::new(0.0, 0.0, 1.0, 100.0).unwrap();
        let mut surface = DisplayList::new();
        compositor.compose(&viewport, &mut surface).unwrap();

        for cmd in surface.commands() {
            let DrawCommand::Stroke { points, .. } = cmd else {
                panic!("expected only strokes");
            };
            assert_eq!(points, &vec![Coord { x: 0.0, y: 100.0 }, Coord { x: 10.0, y: 80.0 }]);
        }
    }

    #[test]
    fn test_equal_priorities_keep_insertion_order() {
        let river = || Shape::waterway(&segment(), false, &identity);
        let lake = || Shape::geo_feature(&triangle(), GeoFeatureKind::Water, &identity);
        assert_eq!(river().draw_priority(), lake().draw_priority());

        let viewport = Viewport::new(0.0, 0.0, 1.0, 10.0).unwrap();
        let kinds = |compositor: Compositor| {
            let mut surface = DisplayList::new();
            let stats = compositor.compose(&viewport, &mut surface).unwrap();
            assert_eq!(stats.by_kind.get("waterway"), Some(&1));
            assert_eq!(stats.by_kind.get("geo_feature"), Some(&1));

            surface
                .commands()
                .iter()
                .map(|cmd| match cmd {
                    DrawCommand::Stroke { .. } => "stroke",
                    DrawCommand::Fill { .. } => "fill",
                    DrawCommand::Text { .. } => "text",
                })
                .collect::<Vec<_>>()
        };

        let river_first: Compositor = vec![river(), lake()].into_iter().collect();
        assert_eq!(kinds(river_first), vec!["stroke", "fill"]);

        let lake_first: Compositor = vec![lake(), river()].into_iter().collect();
        assert_eq!(kinds(lake_first), vec!["fill", "stroke"]);
    }

    #[test]
    fn test_transformed_shape_is_skipped() {
        let viewport = Viewport::new(0.0, 0.0, 1.0, 100.0).unwrap();

        let mut transformed = Shape::railway(&segment(), &identity);
        transformed.apply_viewport(&viewport).unwrap();

        let mut compositor = Compositor::new();
        compositor.push(Shape::border(&segment(), &identity));
        compositor.push(transformed);
        compositor.push(Shape::road(&segment(), false, &identity));

        let mut surface = DisplayList::new();
        let stats = compositor.compose(&viewport, &mut surface).unwrap();

        assert_eq!(stats.rendered, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.by_kind.get("railway"), None);

        // border stroke, then road casing and inner stroke
        let widths: Vec<f32> = surface
            .commands()
            .iter()
            .map(|cmd| match cmd {
                DrawCommand::Stroke { stroke, .. } => stroke.width,
                other => panic!("unexpected command: {other:?}"),
            })
            .collect();
        assert_eq!(widths, vec![2.0, 2.2, 2.0]);
    }

    #[test]
    fn test_extent_and_empty_shapes() {
        let mut compositor = Compositor::new();
        assert!(compositor.extent().is_none());

        compositor.push(Shape::road(&[], false, &identity));
        assert!(compositor.extent().is_none());

        compositor.push(Shape::border(&segment(), &identity));
        let extent = compositor.extent().unwrap();
        assert_eq!(extent.max(), Coord { x: 10.0, y: 20.0 });

        let viewport = Viewport::fit(extent, 100, 100).unwrap();
        let mut surface = DisplayList::new();
        let stats = compositor.compose(&viewport, &mut surface).unwrap();
        assert_eq!(stats.rendered, 2);
        assert_eq!(stats.empty, 1);
        assert_eq!(surface.counts(), (1, 0, 0));
    }
}
