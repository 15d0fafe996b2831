//! Geographic → planar projection.
//!
//! The projection itself is a collaborator: anything implementing
//! [`Projection`] (including a plain closure) can be plugged in. Two Mercator
//! variants are provided, both in meters with `y` growing northward.

use geo::Coord;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

const EARTH_RADIUS_M: f64 = 6_378_137.0;
const EARTH_MINOR_RADIUS_M: f64 = 6_356_752.3142;

/// Web Mercator latitude limit, keeps the world square
const SPHERICAL_MAX_LAT: f64 = 85.051_128_779_806_59;
const ELLIPTICAL_MAX_LAT: f64 = 89.5;

pub trait Projection {
    /// Projects `x = longitude`, `y = latitude` (degrees) onto the plane
    fn project(&self, coord: Coord<f64>) -> Coord<f64>;
}

impl<F> Projection for F
where
    F: Fn(Coord<f64>) -> Coord<f64>,
{
    fn project(&self, coord: Coord<f64>) -> Coord<f64> {
        self(coord)
    }
}

/// Spherical (web) Mercator, EPSG:3857
#[derive(Debug, Clone, Copy, Default)]
pub struct SphericalMercator;

impl Projection for SphericalMercator {
    fn project(&self, coord: Coord<f64>) -> Coord<f64> {
        let lat = coord.y.clamp(-SPHERICAL_MAX_LAT, SPHERICAL_MAX_LAT);
        Coord {
            x: EARTH_RADIUS_M * coord.x.to_radians(),
            y: EARTH_RADIUS_M * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln(),
        }
    }
}

/// Mercator on the WGS84 ellipsoid
#[derive(Debug, Clone, Copy, Default)]
pub struct EllipticalMercator;

impl Projection for EllipticalMercator {
    fn project(&self, coord: Coord<f64>) -> Coord<f64> {
        let ratio = EARTH_MINOR_RADIUS_M / EARTH_RADIUS_M;
        let eccentricity = (1.0 - ratio * ratio).sqrt();

        let phi = coord.y.clamp(-ELLIPTICAL_MAX_LAT, ELLIPTICAL_MAX_LAT).to_radians();
        let con = eccentricity * phi.sin();
        let con = ((1.0 - con) / (1.0 + con)).powf(0.5 * eccentricity);
        let ts = (0.5 * (FRAC_PI_2 - phi)).tan() / con;

        Coord {
            x: EARTH_RADIUS_M * coord.x.to_radians(),
            y: -EARTH_RADIUS_M * ts.ln(),
        }
    }
}

/// Projects every geographic coordinate onto the plane, preserving order
pub fn project_coords<P>(coords: &[Coord<f64>], projection: &P) -> Vec<Coord<f64>>
where
    P: Projection + ?Sized,
{
    coords.iter().map(|&c| projection.project(c)).collect()
}
