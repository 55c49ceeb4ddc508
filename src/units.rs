use std::f64::consts::FRAC_PI_2;

use geo::BoundingRect;
use geo_types::{Coord, Geometry};
use tracing::debug;

use crate::adapters::{check_request, offset_geometry_projected, OffsetResult};
use crate::{OffsetError, Result, Side};

/// Sphere radius of the spherical (web) Mercator projection, in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Inverse projection from the working projected coordinates to geographic
/// coordinates: `x` is the longitude and `y` the latitude, both in degrees.
pub trait Projection {
    fn to_geographic(&self, coord: Coord<f64>) -> Coord<f64>;
}

impl<P: Projection + ?Sized> Projection for &P {
    fn to_geographic(&self, coord: Coord<f64>) -> Coord<f64> {
        (**self).to_geographic(coord)
    }
}

/// Spherical Mercator, EPSG:3857.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebMercator;

impl Projection for WebMercator {
    fn to_geographic(&self, coord: Coord<f64>) -> Coord<f64> {
        Coord {
            x: (coord.x / EARTH_RADIUS).to_degrees(),
            y: (2.0 * (coord.y / EARTH_RADIUS).exp().atan() - FRAC_PI_2).to_degrees(),
        }
    }
}

/// Length distortion of a conformal cylindrical projection at `latitude`
/// degrees.
pub fn scale_factor(latitude: f64) -> f64 {
    1.0 / latitude.to_radians().cos()
}

fn check_distance(meters: f64) -> Result<()> {
    if meters > 0.0 && meters.is_finite() {
        Ok(())
    } else {
        Err(OffsetError::InvalidDistance(meters))
    }
}

/// Converts a ground distance into projected units at the center of the
/// geometry's bounding box.
///
/// This is a single point approximation: geometries spanning a wide range of
/// latitudes get the scale of their center everywhere.
pub fn meters_to_projected_units<P>(
    geometry: &Geometry<f64>,
    meters: f64,
    projection: &P,
) -> Result<f64>
where
    P: Projection + ?Sized,
{
    check_distance(meters)?;
    let center = geometry
        .bounding_rect()
        .map(|rect| rect.center())
        .ok_or_else(|| OffsetError::DegenerateInput("geometry has no extent".to_owned()))?;
    let latitude = projection.to_geographic(center).y;
    let factor = scale_factor(latitude);
    let projected = meters * factor;
    if !(projected > 0.0 && projected.is_finite()) {
        return Err(OffsetError::InvalidDistance(projected));
    }
    debug!(latitude, factor, meters, projected, "converted offset distance");
    Ok(projected)
}

/// Offsets a line or polygon by `meters` of ground distance to `side`.
pub fn offset_geometry<P>(
    geometry: &Geometry<f64>,
    meters: f64,
    side: Side,
    projection: &P,
) -> Result<OffsetResult<f64>>
where
    P: Projection + ?Sized,
{
    check_request(geometry, side)?;
    let distance = meters_to_projected_units(geometry, meters, projection)?;
    offset_geometry_projected(geometry, distance, side)
}
