//! Parallel offsetting of map lines and polygons.
//!
//! Given a line or polygon in a projected (meter-like) coordinate system, a
//! ground distance in meters and a side, this crate builds a new geometry
//! whose vertices are moved perpendicular to the path by that distance, with
//! mitered joins at interior vertices. The distance is scaled by the
//! latitude of the geometry's center to compensate for Mercator distortion.
//!
//! Usage:
//! ```
//! use geo_types::{Coord, LineString};
//! use parallel_offset::offset_path;
//! let input = LineString(vec![
//!     Coord {
//!         x: 0.0,
//!         y: 0.0,
//!     },
//!     Coord {
//!         x: 100.0,
//!         y: 0.0,
//!     },
//! ]);
//! let result = offset_path(&input, 10.0).unwrap();
//! assert_eq!(result, LineString(vec![
//!     Coord {
//!         x: 0.0,
//!         y: -10.0,
//!     },
//!     Coord {
//!         x: 100.0,
//!         y: -10.0,
//!     },
//! ]));
//! ```
//!
//! Whole features are handled by [`create_offset_feature`], which converts
//! the distance, offsets the geometry and derives the new feature's
//! attributes:
//! ```
//! use geo_types::{Geometry, LineString};
//! use parallel_offset::{create_offset_feature_default, Feature, Side};
//! let road = Feature::new(Geometry::LineString(LineString::from(vec![(0.0, 0.0), (100.0, 0.0)])))
//!     .with_property("name", "Main street");
//! let parallel = create_offset_feature_default(&road, 10.0, Side::Left).unwrap();
//! assert_eq!(parallel.properties["name"], "Main street (offset)");
//! ```
//!
//! Paths must not contain repeated consecutive coordinates, and offsetting
//! does not remove self-intersections of the result.

mod adapters;
mod error;
mod feature;
mod intersect;
mod path;
mod side;
mod units;

pub use adapters::{
    check_request, offset_geometry_projected, offset_line, offset_polygon, OffsetResult,
};
pub use error::{OffsetError, Result};
pub use feature::{
    create_offset_feature, create_offset_feature_default, Feature, GeodesicMeasure, LengthMeasure,
    OffsetOptions, Properties,
};
pub use intersect::PARALLEL_EPSILON;
pub use path::{
    coords_equal, distance, is_closed, offset_path, validate_path, MIN_OPEN_LEN, MIN_RING_LEN,
};
pub use side::Side;
pub use units::{
    meters_to_projected_units, offset_geometry, scale_factor, Projection, WebMercator, EARTH_RADIUS,
};
