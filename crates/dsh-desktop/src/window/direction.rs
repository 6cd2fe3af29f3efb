//! Resize direction vectors

use serde::{Deserialize, Serialize};

/// Which edges a resize drag moves.
///
/// Each axis is -1 (left/top edge), 0 (axis untouched) or 1 (right/bottom
/// edge).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResizeDirection {
    pub x: i8,
    pub y: i8,
}

impl ResizeDirection {
    pub const NONE: ResizeDirection = ResizeDirection::new(0, 0);
    pub const N: ResizeDirection = ResizeDirection::new(0, -1);
    pub const S: ResizeDirection = ResizeDirection::new(0, 1);
    pub const E: ResizeDirection = ResizeDirection::new(1, 0);
    pub const W: ResizeDirection = ResizeDirection::new(-1, 0);
    pub const NE: ResizeDirection = ResizeDirection::new(1, -1);
    pub const NW: ResizeDirection = ResizeDirection::new(-1, -1);
    pub const SE: ResizeDirection = ResizeDirection::new(1, 1);
    pub const SW: ResizeDirection = ResizeDirection::new(-1, 1);

    /// Create a direction; components are clamped to -1..=1
    #[inline]
    pub const fn new(x: i8, y: i8) -> Self {
        Self {
            x: if x < 0 { -1 } else if x > 0 { 1 } else { 0 },
            y: if y < 0 { -1 } else if y > 0 { 1 } else { 0 },
        }
    }

    /// Check if no edge moves
    #[inline]
    pub fn is_none(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// CSS cursor shape hinting this direction
    pub fn cursor(&self) -> &'static str {
        match (self.x, self.y) {
            (0, 0) => "default",
            (0, _) => "ns-resize",
            (_, 0) => "ew-resize",
            (x, y) if x == y => "nwse-resize",
            _ => "nesw-resize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_components() {
        assert_eq!(ResizeDirection::new(-5, 9), ResizeDirection::SW);
        assert!(ResizeDirection::new(0, 0).is_none());
    }

    #[test]
    fn test_cursor_hints() {
        assert_eq!(ResizeDirection::N.cursor(), "ns-resize");
        assert_eq!(ResizeDirection::S.cursor(), "ns-resize");
        assert_eq!(ResizeDirection::E.cursor(), "ew-resize");
        assert_eq!(ResizeDirection::W.cursor(), "ew-resize");
        assert_eq!(ResizeDirection::NW.cursor(), "nwse-resize");
        assert_eq!(ResizeDirection::SE.cursor(), "nwse-resize");
        assert_eq!(ResizeDirection::NE.cursor(), "nesw-resize");
        assert_eq!(ResizeDirection::SW.cursor(), "nesw-resize");
        assert_eq!(ResizeDirection::NONE.cursor(), "default");
    }
}
