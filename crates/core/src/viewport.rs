//! Projected plane → tile pixels.
//!
//! Projected `y` grows northward while raster rows grow downward, so the
//! transform flips the vertical axis around the tile height.

use geo::{Coord, Rect};

use crate::error::{Result, TileError};
use crate::projection::Projection;

/// Rewrites every point in place to
/// `((x - min_x) * scale, tile_height - (y - min_y) * scale)`.
///
/// Not idempotent: running it twice over the same points corrupts them.
/// [`Shape::apply_viewport`](crate::shape::Shape::apply_viewport) guards
/// against that; this function does not.
pub fn apply_viewport(points: &mut [Coord<f64>], min_x: f64, min_y: f64, scale: f64, tile_height: f64) {
    for point in points.iter_mut() {
        *point = Coord {
            x: (point.x - min_x) * scale,
            y: tile_height - (point.y - min_y) * scale,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min_x: f64,
    pub min_y: f64,
    pub scale: f64,
    pub tile_height: f64,
}

impl Viewport {
    pub fn new(min_x: f64, min_y: f64, scale: f64, tile_height: f64) -> Result<Self> {
        if !(min_x.is_finite() && min_y.is_finite() && tile_height.is_finite()) {
            return Err(TileError::InvalidViewport(format!(
                "non-finite origin ({min_x}, {min_y}) or tile height {tile_height}"
            )));
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(TileError::InvalidViewport(format!("scale must be positive, got {scale}")));
        }

        Ok(Self {
            min_x,
            min_y,
            scale,
            tile_height,
        })
    }

    /// Fits a projected extent into a `width` x `height` tile, keeping the
    /// aspect ratio. The extent's lower-left corner lands on `(0, height)`.
    pub fn fit(extent: Rect<f64>, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TileError::InvalidViewport(format!(
                "tile size must be non-zero, got {width}x{height}"
            )));
        }

        let dx = extent.width();
        let dy = extent.height();
        let sx = width as f64 / dx;
        let sy = height as f64 / dy;

        // A zero-sized axis places no constraint on the scale
        let scale = match (dx > 0.0, dy > 0.0) {
            (true, true) => sx.min(sy),
            (true, false) => sx,
            (false, true) => sy,
            (false, false) => 1.0,
        };

        Self::new(extent.min().x, extent.min().y, scale, height as f64)
    }

    /// Fits a geographic bounding box (`x = lon`, `y = lat`) by projecting
    /// its corners first
    pub fn fit_geographic<P>(bbox: Rect<f64>, projection: &P, width: u32, height: u32) -> Result<Self>
    where
        P: Projection + ?Sized,
    {
        let extent = Rect::new(projection.project(bbox.min()), projection.project(bbox.max()));
        Self::fit(extent, width, height)
    }

    pub fn apply(&self, points: &mut [Coord<f64>]) {
        apply_viewport(points, self.min_x, self.min_y, self.scale, self.tile_height);
    }

    pub fn to_pixel(&self, point: Coord<f64>) -> Coord<f64> {
        let mut points = [point];
        self.apply(&mut points);
        points[0]
    }
}

/// Bounding box of all points, `None` when there are none
pub fn extent_of<'a>(points: impl IntoIterator<Item = &'a Coord<f64>>) -> Option<Rect<f64>> {
    let mut points = points.into_iter();
    let first = *points.next()?;

    let (min, max) = points.fold((first, first), |(min, max), p| {
        (
            Coord {
                x: min.x.min(p.x),
                y: min.y.min(p.y),
            },
            Coord {
                x: max.x.max(p.x),
                y: max.y.max(p.y),
            },
        )
    });

    Some(Rect::new(min, max))
}
