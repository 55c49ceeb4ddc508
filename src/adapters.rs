use geo::algorithm::winding_order::{Winding, WindingOrder};
use geo::GeoFloat;
use geo_types::{Geometry, LineString, Polygon};
use num_traits::ToPrimitive;

use crate::path::{is_closed, offset_coords, offset_path, validate_path, MIN_RING_LEN};
use crate::{OffsetError, Result, Side};

/// Offset geometry together with the projected distance that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetResult<N: GeoFloat> {
    pub geometry: Geometry<N>,
    pub applied_projected_distance: N,
}

pub(crate) fn variant_name<N: GeoFloat>(geometry: &Geometry<N>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "point",
        Geometry::Line(_) => "line segment",
        Geometry::LineString(_) => "line",
        Geometry::Polygon(_) => "polygon",
        Geometry::MultiPoint(_) => "multi-point",
        Geometry::MultiLineString(_) => "multi-line",
        Geometry::MultiPolygon(_) => "multi-polygon",
        Geometry::GeometryCollection(_) => "geometry collection",
        Geometry::Rect(_) => "rectangle",
        Geometry::Triangle(_) => "triangle",
    }
}

/// Rejects geometry variants the engine does not offset and sides that do not
/// belong to the geometry's variant.
pub fn check_request<N: GeoFloat>(geometry: &Geometry<N>, side: Side) -> Result<()> {
    let valid = match geometry {
        Geometry::LineString(_) => side.is_line_side(),
        Geometry::Polygon(_) => side.is_polygon_side(),
        other => return Err(OffsetError::UnsupportedGeometry(variant_name(other))),
    };
    if valid {
        Ok(())
    } else {
        Err(OffsetError::InvalidSide {
            side,
            variant: variant_name(geometry),
        })
    }
}

/// Offsets a line to its left or right by `distance` projected units.
pub fn offset_line<N: GeoFloat>(
    line: &LineString<N>,
    distance: N,
    side: Side,
) -> Result<LineString<N>> {
    let offset = match side {
        Side::Left => -distance,
        Side::Right => distance,
        _ => {
            return Err(OffsetError::InvalidSide {
                side,
                variant: "line",
            })
        }
    };
    offset_path(line, offset)
}

/// Offsets a ring so that a positive `grow` enlarges the area it encloses.
///
/// The right-hand side of a counter-clockwise ring is its outside, so those
/// rings take `grow` as is and clockwise rings take it negated.
fn offset_ring<N: GeoFloat>(ring: &LineString<N>, grow: N) -> Result<LineString<N>> {
    if !is_closed(ring) {
        return Err(OffsetError::DegenerateInput("polygon ring is not closed".to_owned()));
    }
    validate_path(ring, MIN_RING_LEN)?;
    let offset = match ring.winding_order() {
        Some(WindingOrder::CounterClockwise) => grow,
        Some(WindingOrder::Clockwise) => -grow,
        None => {
            return Err(OffsetError::DegenerateInput(
                "polygon ring has no winding order".to_owned(),
            ))
        }
    };
    offset_coords(ring, true, offset)
}

/// Offsets every ring of a polygon by `distance` projected units.
///
/// `Outward` grows the exterior ring and shrinks the holes, `Inward` does the
/// reverse. Rings are offset independently and are not checked against each
/// other afterwards.
pub fn offset_polygon<N: GeoFloat>(
    polygon: &Polygon<N>,
    distance: N,
    side: Side,
) -> Result<Polygon<N>> {
    let grow = match side {
        Side::Outward => distance,
        Side::Inward => -distance,
        _ => {
            return Err(OffsetError::InvalidSide {
                side,
                variant: "polygon",
            })
        }
    };
    let exterior = offset_ring(polygon.exterior(), grow)?;
    let interiors = polygon
        .interiors()
        .iter()
        .map(|hole| offset_ring(hole, -grow))
        .collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Offsets a line or polygon by a distance already expressed in projected
/// units.
pub fn offset_geometry_projected<N: GeoFloat>(
    geometry: &Geometry<N>,
    distance: N,
    side: Side,
) -> Result<OffsetResult<N>> {
    check_request(geometry, side)?;
    if !(distance > N::zero() && distance.is_finite()) {
        let distance = ToPrimitive::to_f64(&distance).unwrap_or(f64::NAN);
        return Err(OffsetError::InvalidDistance(distance));
    }
    let offset = match geometry {
        Geometry::LineString(line) => Geometry::LineString(offset_line(line, distance, side)?),
        Geometry::Polygon(polygon) => Geometry::Polygon(offset_polygon(polygon, distance, side)?),
        other => return Err(OffsetError::UnsupportedGeometry(variant_name(other))),
    };
    Ok(OffsetResult {
        geometry: offset,
        applied_projected_distance: distance,
    })
}
