//! Region/viewport size heuristic.

use foundation::math::Viewport;
use foundation::{LatLngBounds, PixelBbox, bbox_area};

/// Default fraction of the viewport a region may cover and stay editable.
pub const PAN_MAP_RATIO: f64 = 0.75;

/// Projects `bounds` into the viewport's container pixels.
pub fn region_pixel_bbox(bounds: &LatLngBounds, viewport: &Viewport) -> PixelBbox {
    let ne = viewport.project(bounds.north_east);
    let sw = viewport.project(bounds.south_west);
    PixelBbox::from_corners(ne, sw)
}

/// Region pixel area over viewport pixel area. `0.0` for an empty viewport.
pub fn region_viewport_ratio(bounds: &LatLngBounds, viewport: &Viewport) -> f64 {
    let map_area = viewport.area();
    if map_area <= 0.0 {
        return 0.0;
    }
    bbox_area(&region_pixel_bbox(bounds, viewport)) / map_area
}

/// True when the region covers strictly more than `threshold` of the viewport.
pub fn ratio_exceeds_threshold(bounds: &LatLngBounds, viewport: &Viewport, threshold: f64) -> bool {
    region_viewport_ratio(bounds, viewport) > threshold
}
