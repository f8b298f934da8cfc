//! Spherical Web Mercator projection into container pixels.

use serde::{Deserialize, Serialize};

use super::{PixelPoint, PixelSize};
use crate::geo::GeoPoint;

/// Tile edge length in pixels at zoom 0.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Web Mercator world.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Side of the world square in pixels at `zoom`.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}

/// Projects to absolute world pixels at `zoom`.
pub fn project_world(point: GeoPoint, zoom: f64) -> PixelPoint {
    let size = world_size(zoom);
    let lat = point.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = (point.lng + 180.0) / 360.0;
    let y = 0.5 - (lat.sin().atanh()) / (2.0 * std::f64::consts::PI);
    PixelPoint::new(x * size, y * size)
}

/// Inverse of `project_world`.
pub fn unproject_world(p: PixelPoint, zoom: f64) -> GeoPoint {
    let size = world_size(zoom);
    let lng = p.x / size * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * p.y / size);
    let lat = n.sinh().atan().to_degrees();
    GeoPoint::new(lat, lng)
}

/// Visible map state: center, zoom and container size.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: f64,
    pub size: PixelSize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: GeoPoint::new(0.0, 0.0),
            zoom: 2.0,
            size: PixelSize::new(1024.0, 768.0),
        }
    }
}

impl Viewport {
    pub fn new(center: GeoPoint, zoom: f64, size: PixelSize) -> Self {
        Self { center, zoom, size }
    }

    fn origin(&self) -> PixelPoint {
        project_world(self.center, self.zoom) - self.size.half()
    }

    /// Geographic point to container pixels.
    pub fn project(&self, point: GeoPoint) -> PixelPoint {
        project_world(point, self.zoom) - self.origin()
    }

    /// Container pixels back to a geographic point.
    pub fn unproject(&self, p: PixelPoint) -> GeoPoint {
        unproject_world(p + self.origin(), self.zoom)
    }

    pub fn area(&self) -> f64 {
        self.size.area()
    }

    pub fn pan_to(&mut self, center: GeoPoint) {
        self.center = center;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    pub fn resize(&mut self, size: PixelSize) {
        self.size = size;
    }
}
