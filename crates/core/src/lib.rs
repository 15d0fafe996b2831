//! # tilepaint-core
//!
//! Turns tagged geographic features into styled, z-ordered shapes and paints
//! them onto a tile.
//!
//! ## Pipeline
//!
//! 1. **Classify**: each [`RawFeature`] becomes exactly one [`Shape`]. Border
//!    and populated-place gates run first, then the ordered [`Taxonomy`]
//!    table, then the natural-tag fallback.
//! 2. **Project**: geographic coordinates are projected onto a plane by a
//!    [`Projection`] while the shape is built.
//! 3. **Fit**: the driver picks a [`Viewport`] (extent, scale, tile height).
//! 4. **Compose**: the [`Compositor`] sorts shapes by draw priority, moves
//!    each one into pixel space exactly once and renders it onto a
//!    [`DrawingSurface`].
//!
//! ## Example
//!
//! ```
//! use tilepaint_core::prelude::*;
//! use geo::Coord;
//!
//! let feature = RawFeature::new(
//!     GeometryKind::LineString,
//!     vec![Coord { x: 13.40, y: 52.52 }, Coord { x: 13.41, y: 52.53 }],
//!     Tags::from_pairs([("highway", "primary")]),
//! );
//!
//! let classifier = Classifier::default();
//! let shape = classifier.classify(&feature, &SphericalMercator);
//! assert_eq!(shape.draw_priority(), 50);
//!
//! let mut compositor = Compositor::new();
//! compositor.push(shape);
//! let viewport = Viewport::fit(compositor.extent().unwrap(), 256, 256).unwrap();
//!
//! let mut surface = DisplayList::new();
//! let stats = compositor.compose(&viewport, &mut surface).unwrap();
//! assert_eq!(stats.rendered, 1);
//! assert_eq!(surface.commands().len(), 2); // casing + inner stroke
//! ```

pub mod classify;
pub mod compositor;
pub mod error;
pub mod feature;
pub mod projection;
pub mod shape;
pub mod style;
pub mod surface;
pub mod viewport;

pub mod prelude {
    pub use crate::classify::{
        should_be_border, should_be_populated_place, taxonomy::Taxonomy, Classifier,
    };
    pub use crate::compositor::{Compositor, RenderStats};
    pub use crate::error::{Result, TileError};
    pub use crate::feature::{GeometryKind, RawFeature, Tags};
    pub use crate::projection::{EllipticalMercator, Projection, SphericalMercator};
    pub use crate::shape::{GeoFeatureKind, Shape, ShapeKind};
    pub use crate::style::{Color, FontSpec, Stroke};
    pub use crate::surface::{DisplayList, DrawCommand, DrawingSurface};
    pub use crate::viewport::Viewport;
}

pub use prelude::*;
