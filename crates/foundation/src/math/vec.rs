use serde::{Deserialize, Serialize};

/// Point in container pixel space (origin top-left, y grows downwards).
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for PixelPoint {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for PixelPoint {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Viewport dimensions in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: f64,
    pub height: f64,
}

impl PixelSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn half(&self) -> PixelPoint {
        PixelPoint::new(self.width * 0.5, self.height * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::{PixelPoint, PixelSize};

    #[test]
    fn point_arithmetic() {
        let a = PixelPoint::new(3.0, 4.0);
        let b = PixelPoint::new(1.0, 1.0);
        assert_eq!(a - b, PixelPoint::new(2.0, 3.0));
        assert_eq!(a + b, PixelPoint::new(4.0, 5.0));
    }

    #[test]
    fn negative_size_has_no_area() {
        assert_eq!(PixelSize::new(-10.0, 20.0).area(), 0.0);
        assert_eq!(PixelSize::new(800.0, 600.0).area(), 480_000.0);
    }
}
