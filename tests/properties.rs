use approx::{assert_abs_diff_eq, assert_relative_eq};
use geo::Area;
use geo_types::{Coord, Geometry, LineString, Point, Polygon};
use parallel_offset::{
    coords_equal, create_offset_feature, create_offset_feature_default, is_closed,
    meters_to_projected_units, offset_geometry, offset_path, Feature, GeodesicMeasure,
    OffsetError, OffsetOptions, Projection, Side, WebMercator,
};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn line(coords: &[(f64, f64)]) -> LineString<f64> {
    coords.iter().copied().collect()
}

fn all_finite(path: &LineString<f64>) -> bool {
    path.0.iter().all(|c| c.x.is_finite() && c.y.is_finite())
}

struct FixedLatitude(f64);

impl Projection for FixedLatitude {
    fn to_geographic(&self, coord: Coord<f64>) -> Coord<f64> {
        Coord { x: coord.x, y: self.0 }
    }
}

#[test]
fn simple_line_moves_perpendicular() {
    init_tracing();
    let geometry = Geometry::LineString(line(&[(0.0, 0.0), (100.0, 0.0)]));
    let result = offset_geometry(&geometry, 10.0, Side::Right, &WebMercator).unwrap();
    assert_relative_eq!(result.applied_projected_distance, 10.0);
    let Geometry::LineString(offset) = result.geometry else {
        panic!("expected a line");
    };
    assert_eq!(offset.0.len(), 2);
    assert_abs_diff_eq!(offset.0[0].x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(offset.0[0].y, -10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(offset.0[1].x, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(offset.0[1].y, -10.0, epsilon = 1e-9);
}

#[test]
fn left_then_right_restores_a_straight_path() {
    let original = line(&[(3.0, 4.0), (33.0, 44.0)]);
    let left = offset_path(&original, -7.5).unwrap();
    let back = offset_path(&left, 7.5).unwrap();
    for (a, b) in back.0.iter().zip(&original.0) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
    }

    let collinear = line(&[(0.0, 0.0), (10.0, 5.0), (20.0, 10.0), (40.0, 20.0)]);
    let back = offset_path(&offset_path(&collinear, -2.0).unwrap(), 2.0).unwrap();
    assert_abs_diff_eq!(back.0[0].x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(back.0[0].y, 0.0, epsilon = 1e-9);
    let last = back.0[back.0.len() - 1];
    assert_abs_diff_eq!(last.x, 40.0, epsilon = 1e-9);
    assert_abs_diff_eq!(last.y, 20.0, epsilon = 1e-9);
}

#[test]
fn closed_input_stays_closed() {
    let rings = [
        line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
        line(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]),
        line(&[(0.0, 0.0), (8.0, 1.0), (9.0, 7.0), (4.0, 12.0), (-2.0, 6.0), (0.0, 0.0)]),
    ];
    for ring in &rings {
        for offset in [-1.0, 0.5, 3.0] {
            let result = offset_path(ring, offset).unwrap();
            assert!(is_closed(&result), "{:?} offset by {} is open", ring, offset);
            assert!(coords_equal(result.0[0], result.0[result.0.len() - 1]));
            assert_eq!(result.0.len(), ring.0.len());
        }
    }
}

#[test]
fn collinear_vertices_are_dropped_without_nan() {
    init_tracing();
    let path = line(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0), (30.0, 10.0)]);
    let result = offset_path(&path, 2.0).unwrap();
    assert!(result.0.len() <= path.0.len());
    assert_eq!(result.0.len(), 3);
    assert!(all_finite(&result));

    let ring = line(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
    let result = offset_path(&ring, 1.0).unwrap();
    assert!(result.0.len() <= ring.0.len());
    assert!(is_closed(&result));
    assert!(all_finite(&result));

    // the ring starts on the collinear vertex, so it closes on the next join
    let ring = line(&[(5.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0), (5.0, 0.0)]);
    let result = offset_path(&ring, 1.0).unwrap();
    assert_eq!(result.0.len(), 5);
    assert!(is_closed(&result));
    assert!(all_finite(&result));
    assert_abs_diff_eq!(result.0[0].x, 11.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.0[0].y, -1.0, epsilon = 1e-9);
}

#[test]
fn convex_polygon_area_is_monotonic() {
    let hexagon = Polygon::new(
        line(&[
            (0.0, 0.0),
            (40.0, -10.0),
            (80.0, 0.0),
            (90.0, 40.0),
            (40.0, 70.0),
            (-10.0, 40.0),
            (0.0, 0.0),
        ]),
        vec![],
    );
    let area = hexagon.unsigned_area();
    let geometry = Geometry::Polygon(hexagon);
    for meters in [0.5, 2.0, 5.0] {
        let Geometry::Polygon(grown) =
            offset_geometry(&geometry, meters, Side::Outward, &WebMercator).unwrap().geometry
        else {
            panic!("expected a polygon");
        };
        let Geometry::Polygon(shrunk) =
            offset_geometry(&geometry, meters, Side::Inward, &WebMercator).unwrap().geometry
        else {
            panic!("expected a polygon");
        };
        assert!(grown.unsigned_area() > area);
        assert!(shrunk.unsigned_area() < area);
    }
}

#[test]
fn scale_factor_bounds() {
    let geometry = Geometry::LineString(line(&[(0.0, -5.0), (10.0, 5.0)]));
    assert_eq!(meters_to_projected_units(&geometry, 25.0, &FixedLatitude(0.0)), Ok(25.0));
    let mut previous = 25.0;
    for latitude in [1.0, 15.0, 45.0, 70.0, 85.0, 89.0, 89.9, 89.999] {
        for signed in [latitude, -latitude] {
            let projected =
                meters_to_projected_units(&geometry, 25.0, &FixedLatitude(signed)).unwrap();
            assert!(projected > 25.0);
            assert!(projected > previous);
        }
        previous = meters_to_projected_units(&geometry, 25.0, &FixedLatitude(latitude)).unwrap();
    }
    assert!(previous > 1.0e6);
}

#[test]
fn attributes_are_preserved() {
    init_tracing();
    let ring = line(&[(0.0, 0.0), (500.0, 0.0), (500.0, 500.0), (0.0, 500.0), (0.0, 0.0)]);
    let source = Feature::new(Geometry::Polygon(Polygon::new(ring, vec![])))
        .with_property("name", "Field")
        .with_property("stroke", "#00ff00")
        .with_property("stroke-width", 2.5)
        .with_property("tags", json!(["crop", "wheat"]))
        .with_property("length", 1.0)
        .as_measurement();
    let offset = create_offset_feature(
        &source,
        20.0,
        Side::Outward,
        &WebMercator,
        &GeodesicMeasure::new(WebMercator),
        &OffsetOptions::default(),
    )
    .unwrap();

    assert_eq!(offset.properties.len(), source.properties.len());
    for (key, value) in &source.properties {
        match key.as_str() {
            "name" => assert_eq!(offset.properties[key], json!("Field (offset)")),
            "length" => {
                // perimeter of the grown 540 x 540 square
                let length = offset.properties[key].as_f64().unwrap();
                assert_relative_eq!(length, 2160.0, max_relative = 1e-2);
            }
            _ => assert_eq!(&offset.properties[key], value),
        }
    }
    assert_eq!(source.properties["length"], json!(1.0));
}

#[test]
fn inward_on_a_line_is_rejected() {
    let source = Feature::new(Geometry::LineString(line(&[(0.0, 0.0), (100.0, 0.0)])));
    assert_eq!(
        create_offset_feature_default(&source, 10.0, Side::Inward),
        Err(OffsetError::InvalidSide {
            side: Side::Inward,
            variant: "line",
        })
    );
}

#[test]
fn unsupported_and_degenerate_inputs_fail_closed() {
    let point = Feature::new(Geometry::Point(Point::new(1.0, 2.0)));
    assert_eq!(
        create_offset_feature_default(&point, 10.0, Side::Left),
        Err(OffsetError::UnsupportedGeometry("point"))
    );

    let repeated = Feature::new(Geometry::LineString(line(&[(0.0, 0.0), (5.0, 5.0), (5.0, 5.0)])));
    assert!(matches!(
        create_offset_feature_default(&repeated, 10.0, Side::Left),
        Err(OffsetError::DegenerateInput(_))
    ));
}
