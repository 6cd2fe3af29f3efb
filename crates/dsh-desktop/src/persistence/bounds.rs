//! Saved window bounds

use serde::{Deserialize, Serialize};
use crate::error::DesktopResult;
use crate::math::Rect;
use crate::window::Window;

/// Last bounds of a main window, stored as `[maximized, [x, y, w, h]]`.
///
/// The rectangle is always the normal (unmaximized) one, so a window that
/// was closed maximized still knows where to go when restored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedBounds(pub bool, pub [f32; 4]);

impl SavedBounds {
    /// Capture bounds from a window
    pub fn from_window(window: &Window) -> Self {
        Self(
            window.is_maximized_underneath(),
            window.normal_bounds().to_array(),
        )
    }

    #[inline]
    pub fn maximized(&self) -> bool {
        self.0
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_array(self.1)
    }

    pub fn to_json(&self) -> DesktopResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> DesktopResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_wire_format() {
        let saved = SavedBounds(true, [10.0, 20.0, 300.0, 200.0]);
        assert_eq!(saved.to_json().unwrap(), "[true,[10.0,20.0,300.0,200.0]]");

        let parsed = SavedBounds::from_json("[false,[1,2,3,4]]").unwrap();
        assert!(!parsed.maximized());
        assert_eq!(parsed.rect(), Rect::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_rejects_malformed_value() {
        assert!(SavedBounds::from_json(r#"{"x":1}"#).is_err());
        assert!(SavedBounds::from_json("[true,[1,2,3]]").is_err());
    }
}
