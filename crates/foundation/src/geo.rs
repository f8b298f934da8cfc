//! Geographic primitives in WGS84 degrees.

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

}

/// One of the four corners of a `LatLngBounds`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Corner {
    pub fn opposite(self) -> Corner {
        match self {
            Corner::NorthEast => Corner::SouthWest,
            Corner::NorthWest => Corner::SouthEast,
            Corner::SouthEast => Corner::NorthWest,
            Corner::SouthWest => Corner::NorthEast,
        }
    }
}

/// Axis-aligned geographic box.
///
/// Invariant: `south_west.lat <= north_east.lat` and
/// `south_west.lng <= north_east.lng`. A zero-area box (point) is allowed.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl LatLngBounds {
    /// Builds the box spanned by two arbitrary corners.
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            south_west: GeoPoint::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: GeoPoint::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    pub fn from_edges(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self::from_corners(GeoPoint::new(north, east), GeoPoint::new(south, west))
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    pub fn corner(&self, corner: Corner) -> GeoPoint {
        match corner {
            Corner::NorthEast => self.north_east,
            Corner::NorthWest => GeoPoint::new(self.north(), self.west()),
            Corner::SouthEast => GeoPoint::new(self.south(), self.east()),
            Corner::SouthWest => self.south_west,
        }
    }

    /// Moves `corner` to `to`, keeping the opposite corner fixed.
    pub fn with_corner(&self, corner: Corner, to: GeoPoint) -> Self {
        Self::from_corners(self.corner(corner.opposite()), to)
    }

    pub fn translate(&self, d_lat: f64, d_lng: f64) -> Self {
        Self {
            south_west: GeoPoint::new(self.south_west.lat + d_lat, self.south_west.lng + d_lng),
            north_east: GeoPoint::new(self.north_east.lat + d_lat, self.north_east.lng + d_lng),
        }
    }
}
