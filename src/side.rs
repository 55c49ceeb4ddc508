use std::fmt;
use std::str::FromStr;

use crate::OffsetError;

/// Direction of an offset.
///
/// `Left` and `Right` are relative to the walking direction of a line and are
/// only valid for line geometries. `Inward` and `Outward` are relative to the
/// polygon body and are only valid for polygons.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    Left,
    Right,
    Inward,
    Outward,
}

impl Side {
    pub fn is_line_side(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    pub fn is_polygon_side(self) -> bool {
        matches!(self, Side::Inward | Side::Outward)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Inward => "inward",
            Side::Outward => "outward",
        };
        f.write_str(name)
    }
}

impl FromStr for Side {
    type Err = OffsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            "inward" => Ok(Side::Inward),
            "outward" => Ok(Side::Outward),
            _ => Err(OffsetError::UnknownSide(s.to_owned())),
        }
    }
}
