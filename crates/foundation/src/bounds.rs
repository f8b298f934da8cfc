use crate::math::PixelPoint;

/// Axis-aligned box in container pixel space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelBbox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl PixelBbox {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        PixelBbox { min, max }
    }

    /// Box spanned by two projected corners, in any order.
    pub fn from_corners(a: PixelPoint, b: PixelPoint) -> Self {
        PixelBbox {
            min: [a.x.min(b.x), a.y.min(b.y)],
            max: [a.x.max(b.x), a.y.max(b.y)],
        }
    }

    pub fn width(&self) -> f64 {
        (self.max[0] - self.min[0]).abs()
    }

    pub fn height(&self) -> f64 {
        (self.max[1] - self.min[1]).abs()
    }
}

/// Area of a pixel-space box; zero for degenerate boxes.
pub fn bbox_area(bbox: &PixelBbox) -> f64 {
    let area = bbox.width() * bbox.height();
    if area.is_finite() { area } else { 0.0 }
}
