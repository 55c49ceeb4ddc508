use geo::GeodesicLength;
use geo_types::{Geometry, LineString};
use serde_json::{Map, Value};

use crate::units::{offset_geometry, Projection, WebMercator};
use crate::{Result, Side};

pub type Properties = Map<String, Value>;

/// A geometry in projected coordinates with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry<f64>,
    pub properties: Properties,
    /// Measurement features carry a length attribute derived from their
    /// geometry.
    pub measurement: bool,
}

impl Feature {
    pub fn new(geometry: Geometry<f64>) -> Self {
        Feature {
            geometry,
            properties: Properties::new(),
            measurement: false,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn as_measurement(mut self) -> Self {
        self.measurement = true;
        self
    }
}

/// Attribute names and the suffix used when deriving an offset feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetOptions {
    pub name_key: String,
    pub name_suffix: String,
    pub length_key: String,
}

impl Default for OffsetOptions {
    fn default() -> Self {
        OffsetOptions {
            name_key: "name".to_owned(),
            name_suffix: " (offset)".to_owned(),
            length_key: "length".to_owned(),
        }
    }
}

/// Ground length of a projected geometry, in meters.
pub trait LengthMeasure {
    fn length_meters(&self, geometry: &Geometry<f64>) -> f64;
}

/// Geodesic length on the WGS84 ellipsoid of the inverse-projected geometry.
/// Polygons are measured along their exterior ring; other variants have no
/// length.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeodesicMeasure<P> {
    projection: P,
}

impl<P: Projection> GeodesicMeasure<P> {
    pub fn new(projection: P) -> Self {
        GeodesicMeasure { projection }
    }

    fn geographic(&self, line: &LineString<f64>) -> LineString<f64> {
        line.coords().map(|&c| self.projection.to_geographic(c)).collect()
    }
}

impl<P: Projection> LengthMeasure for GeodesicMeasure<P> {
    fn length_meters(&self, geometry: &Geometry<f64>) -> f64 {
        match geometry {
            Geometry::LineString(line) => self.geographic(line).geodesic_length(),
            Geometry::Polygon(polygon) => self.geographic(polygon.exterior()).geodesic_length(),
            _ => 0.0,
        }
    }
}

/// Derives a new feature whose geometry is `source` offset by `meters` to
/// `side`.
///
/// All attributes are copied. A string name gets the configured suffix, and a
/// measurement feature gets its length recomputed from the new geometry.
pub fn create_offset_feature<P, M>(
    source: &Feature,
    meters: f64,
    side: Side,
    projection: &P,
    measure: &M,
    options: &OffsetOptions,
) -> Result<Feature>
where
    P: Projection + ?Sized,
    M: LengthMeasure + ?Sized,
{
    let result = offset_geometry(&source.geometry, meters, side, projection)?;

    let mut properties = source.properties.clone();
    if let Some(Value::String(name)) = properties.get_mut(&options.name_key) {
        name.push_str(&options.name_suffix);
    }
    if source.measurement {
        let length = measure.length_meters(&result.geometry);
        properties.insert(options.length_key.clone(), Value::from(length));
    }

    Ok(Feature {
        geometry: result.geometry,
        properties,
        measurement: source.measurement,
    })
}

/// [`create_offset_feature`] for web Mercator coordinates with geodesic
/// lengths and the default attribute names.
pub fn create_offset_feature_default(source: &Feature, meters: f64, side: Side) -> Result<Feature> {
    create_offset_feature(
        source,
        meters,
        side,
        &WebMercator,
        &GeodesicMeasure::new(WebMercator),
        &OffsetOptions::default(),
    )
}
