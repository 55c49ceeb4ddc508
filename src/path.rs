use geo_types::{Coord, CoordFloat, LineString};
use num_traits::{NumCast, ToPrimitive};
use tracing::trace;

use crate::intersect::{intersect, OffsetLine};
use crate::{OffsetError, Result};

/// Minimum coordinate count of an open path.
pub const MIN_OPEN_LEN: usize = 2;
/// Minimum coordinate count of a closed ring, closing coordinate included.
pub const MIN_RING_LEN: usize = 4;

/// Converts an `f64` constant into the working float type.
pub(crate) fn float_const<N: CoordFloat>(value: f64) -> N {
    <N as NumCast>::from(value).unwrap_or_else(N::epsilon)
}

/// Euclidean distance in projected units.
pub fn distance<N: CoordFloat>(p1: Coord<N>, p2: Coord<N>) -> N {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

/// Exact value equality. Only used to detect ring closure.
pub fn coords_equal<N: CoordFloat>(p1: Coord<N>, p2: Coord<N>) -> bool {
    p1.x == p2.x && p1.y == p2.y
}

pub fn is_closed<N: CoordFloat>(path: &LineString<N>) -> bool {
    match (path.0.first(), path.0.last()) {
        (Some(first), Some(last)) if path.0.len() >= 2 => coords_equal(*first, *last),
        _ => false,
    }
}

/// Unit normal pointing to the right of the direction `p0 -> p1`.
pub(crate) fn segment_normal<N: CoordFloat>(p0: Coord<N>, p1: Coord<N>) -> Coord<N> {
    let len = distance(p0, p1);
    Coord {
        x: (p1.y - p0.y) / len,
        y: (p0.x - p1.x) / len,
    }
}

fn translate<N: CoordFloat>(p: Coord<N>, normal: Coord<N>, offset: N) -> Coord<N> {
    Coord {
        x: p.x + offset * normal.x,
        y: p.y + offset * normal.y,
    }
}

fn is_finite<N: CoordFloat>(p: &Coord<N>) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Checks that `path` has at least `min_len` finite coordinates and no
/// zero-length segment.
pub fn validate_path<N: CoordFloat>(path: &LineString<N>, min_len: usize) -> Result<()> {
    if path.0.len() < min_len {
        return Err(OffsetError::DegenerateInput(format!(
            "path has {} coordinates, at least {} required",
            path.0.len(),
            min_len
        )));
    }
    if let Some(idx) = path.0.iter().position(|c| !is_finite(c)) {
        return Err(OffsetError::DegenerateInput(format!(
            "non-finite coordinate at index {idx}"
        )));
    }
    if let Some(idx) = path
        .0
        .windows(2)
        .position(|w| distance(w[0], w[1]) == N::zero())
    {
        return Err(OffsetError::DegenerateInput(format!(
            "zero-length segment at index {idx}"
        )));
    }
    Ok(())
}

/// Pushes the mitered vertex at `p1`, unless the two segments are parallel.
fn push_join<N: CoordFloat>(
    out: &mut Vec<Coord<N>>,
    p0: Coord<N>,
    p1: Coord<N>,
    p2: Coord<N>,
    offset: N,
) {
    let incoming = OffsetLine::new(p0, p1, offset);
    let outgoing = OffsetLine::new(p1, p2, offset);
    match intersect(&incoming, &outgoing) {
        Some(joined) => out.push(joined),
        None => trace!(vertex = ?p1, "skipping join of parallel segments"),
    }
}

fn offset_open<N: CoordFloat>(coords: &[Coord<N>], offset: N) -> Vec<Coord<N>> {
    let n = coords.len();
    let mut out = Vec::with_capacity(n);
    out.push(translate(coords[0], segment_normal(coords[0], coords[1]), offset));
    for w in coords.windows(3) {
        push_join(&mut out, w[0], w[1], w[2], offset);
    }
    out.push(translate(
        coords[n - 1],
        segment_normal(coords[n - 2], coords[n - 1]),
        offset,
    ));
    out
}

fn offset_closed<N: CoordFloat>(coords: &[Coord<N>], offset: N) -> Result<Vec<Coord<N>>> {
    // drop the closing coordinate, then walk the ring cyclically
    let ring = &coords[..coords.len() - 1];
    let k = ring.len();
    let mut out = Vec::with_capacity(coords.len());
    for idx in 0..k {
        push_join(&mut out, ring[(idx + k - 1) % k], ring[idx], ring[(idx + 1) % k], offset);
    }
    match out.first().copied() {
        Some(first) => {
            out.push(first);
            Ok(out)
        }
        None => Err(OffsetError::DegenerateInput(
            "every vertex of the ring joins parallel segments".to_owned(),
        )),
    }
}

/// Offsets an already validated path.
pub(crate) fn offset_coords<N: CoordFloat>(
    path: &LineString<N>,
    closed: bool,
    offset: N,
) -> Result<LineString<N>> {
    let coords = if closed {
        offset_closed(&path.0, offset)?
    } else {
        offset_open(&path.0, offset)
    };
    if coords.iter().any(|c| !is_finite(c)) {
        return Err(OffsetError::DegenerateInput(
            "offset produced a non-finite coordinate".to_owned(),
        ));
    }
    Ok(LineString(coords))
}

/// Offsets every vertex of `path` perpendicular to the local direction.
///
/// A positive `offset` moves the path to the right-hand side of its walking
/// direction, a negative one to the left. Interior vertices are mitered to the
/// intersection of the two adjacent offset segments. A vertex between two
/// parallel segments has no stable miter and is left out of the result.
///
/// Open paths get their end vertices from the perpendicular offset of the
/// first and last segment. Closed paths (first coordinate equal to the last)
/// are walked cyclically and the result is closed again.
///
/// The input must not contain zero-length segments; such paths fail with
/// [`OffsetError::DegenerateInput`].
pub fn offset_path<N: CoordFloat>(path: &LineString<N>, offset: N) -> Result<LineString<N>> {
    if !offset.is_finite() {
        let offset = ToPrimitive::to_f64(&offset).unwrap_or(f64::NAN);
        return Err(OffsetError::InvalidDistance(offset));
    }
    let closed = is_closed(path);
    validate_path(path, if closed { MIN_RING_LEN } else { MIN_OPEN_LEN })?;
    offset_coords(path, closed, offset)
}
