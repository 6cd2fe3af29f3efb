//! Input result type

use serde::Serialize;
use crate::window::WindowId;

/// Result of pointer handling
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputResult {
    /// Input was handled by the compositor
    Handled,
    /// Input was not handled (pass through)
    Unhandled,
    /// Input should be forwarded to window content
    Forward {
        /// Target window
        window_id: WindowId,
        /// X coordinate in window-local space
        local_x: f32,
        /// Y coordinate in window-local space
        local_y: f32,
    },
}

impl InputResult {
    /// Check if input was handled
    #[inline]
    pub fn is_handled(&self) -> bool {
        matches!(self, InputResult::Handled | InputResult::Forward { .. })
    }

    /// Check if input should be forwarded
    #[inline]
    pub fn is_forward(&self) -> bool {
        matches!(self, InputResult::Forward { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_serialization() {
        let result = InputResult::Forward {
            window_id: 3,
            local_x: 12.0,
            local_y: 4.5,
        };
        assert!(result.is_handled());
        assert!(result.is_forward());

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"type":"forward","window_id":3,"local_x":12.0,"local_y":4.5}"#);
        assert!(!InputResult::Unhandled.is_handled());
    }
}
