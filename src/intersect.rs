use geo_types::{Coord, CoordFloat};

use crate::path::{float_const, segment_normal};

/// Slope difference below which two offset lines are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// A segment moved sideways by a signed offset, kept as a point and a slope.
#[derive(Debug, Clone, Copy)]
pub struct OffsetLine<N: CoordFloat> {
    pub anchor: Coord<N>,
    /// `None` for vertical segments.
    pub slope: Option<N>,
}

impl<N: CoordFloat> OffsetLine<N> {
    /// The line through `p0` and `p1`, translated by `offset` along the
    /// right-hand normal of the segment. `p0` and `p1` must be distinct.
    pub fn new(p0: Coord<N>, p1: Coord<N>, offset: N) -> Self {
        let normal = segment_normal(p0, p1);
        let dx = p1.x - p0.x;
        OffsetLine {
            anchor: Coord {
                x: p0.x + offset * normal.x,
                y: p0.y + offset * normal.y,
            },
            slope: if dx == N::zero() {
                None
            } else {
                Some((p1.y - p0.y) / dx)
            },
        }
    }

    /// Height of the line at `x`, measured from the anchor so large map
    /// coordinates do not meet a large slope in one product.
    fn y_at(&self, slope: N, x: N) -> N {
        self.anchor.y + slope * (x - self.anchor.x)
    }
}

/// Intersection point of two offset lines, or `None` when they are parallel.
pub fn intersect<N: CoordFloat>(a: &OffsetLine<N>, b: &OffsetLine<N>) -> Option<Coord<N>> {
    match (a.slope, b.slope) {
        (None, None) => None,
        (None, Some(mb)) => {
            let x = a.anchor.x;
            Some(Coord { x, y: b.y_at(mb, x) })
        }
        (Some(ma), None) => {
            let x = b.anchor.x;
            Some(Coord { x, y: a.y_at(ma, x) })
        }
        (Some(ma), Some(mb)) => {
            if (ma - mb).abs() < float_const(PARALLEL_EPSILON) {
                return None;
            }
            // solve relative to the anchor of `a`
            let dx = b.anchor.x - a.anchor.x;
            let dy = b.anchor.y - a.anchor.y;
            let x = a.anchor.x + (dy - mb * dx) / (ma - mb);
            // the flatter line is the better conditioned one for y
            let y = if ma.abs() <= mb.abs() {
                a.y_at(ma, x)
            } else {
                b.y_at(mb, x)
            };
            Some(Coord { x, y })
        }
    }
}
