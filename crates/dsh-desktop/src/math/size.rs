//! 2D size type for dimensions

use serde::{Deserialize, Serialize};

/// 2D size for width and height
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check if size is zero or negative
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Grow each dimension to at least `min`
    #[inline]
    pub fn at_least(self, min: Size) -> Self {
        Self::new(self.width.max(min.width), self.height.max(min.height))
    }

    /// Shrink each dimension to at most `max`
    #[inline]
    pub fn at_most(self, max: Size) -> Self {
        Self::new(self.width.min(max.width), self.height.min(max.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_at_least() {
        let s = Size::new(50.0, 500.0).at_least(Size::new(100.0, 100.0));
        assert!((s.width - 100.0).abs() < 0.001);
        assert!((s.height - 500.0).abs() < 0.001);
    }

    #[test]
    fn test_size_at_most() {
        let s = Size::new(2500.0, 300.0).at_most(Size::new(1920.0, 1080.0));
        assert!((s.width - 1920.0).abs() < 0.001);
        assert!((s.height - 300.0).abs() < 0.001);
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10.0, 0.0).is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }
}
