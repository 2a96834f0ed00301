use crate::core::geo::PixelPoint;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel coordinates (image or screen space)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of the given size anchored at its top-left corner
    pub fn at(origin: PixelPoint, width: i32, height: i32) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    pub fn origin(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }

    /// Checks if `other` lies entirely within this rectangle
    pub fn contains_rect(&self, other: &PixelRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_rect() {
        let image = PixelRect::new(0, 0, 2048, 2048);
        assert!(image.contains_rect(&PixelRect::new(1920, 1888, 128, 160)));
        assert!(!image.contains_rect(&PixelRect::new(1921, 0, 128, 160)));
        assert!(!image.contains_rect(&PixelRect::new(0, -1, 3, 3)));
    }
}
