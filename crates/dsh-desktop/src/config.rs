//! Desktop preferences

use serde::{Deserialize, Serialize};
use crate::error::DesktopResult;
use crate::math::{Size, Vec2};

/// User-tunable compositor preferences.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use dsh_desktop::DesktopConfig;
///
/// let config = DesktopConfig::from_json(r#"{ "live_redraw": false }"#).unwrap();
/// assert!(!config.live_redraw);
/// assert!(config.group_windows);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Redraw window content while dragging. When off, a placeholder
    /// rectangle follows the pointer and bounds are committed on release.
    pub live_redraw: bool,
    /// Group windows of one application behind a single taskbar entry
    pub group_windows: bool,
    /// Height of the draggable title region
    pub title_bar_height: f32,
    /// Resize grip depth inside the window border
    pub resize_inner_margin: f32,
    /// Resize grip depth outside the window border
    pub resize_outer_margin: f32,
    /// Downward drag distance that pulls a maximized window out of maximize
    pub unmaximize_threshold: f32,
    /// Where the first auto-placed window lands
    pub cascade_origin: Vec2,
    /// Offset applied while looking for a free origin
    pub cascade_step: f32,
    /// Two origins closer than this count as overlapping
    pub overlap_tolerance: f32,
    /// Minimum size for windows that do not set one
    pub default_min_size: Size,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            live_redraw: true,
            group_windows: true,
            title_bar_height: 28.0,
            resize_inner_margin: 4.0,
            resize_outer_margin: 6.0,
            unmaximize_threshold: 10.0,
            cascade_origin: Vec2::new(40.0, 40.0),
            cascade_step: 24.0,
            overlap_tolerance: 2.0,
            default_min_size: Size::new(120.0, 80.0),
        }
    }
}

impl DesktopConfig {
    /// Parse preferences from JSON, filling in defaults for missing fields
    pub fn from_json(json: &str) -> DesktopResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize preferences to JSON
    pub fn to_json(&self) -> DesktopResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DesktopError;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = DesktopConfig::from_json("{}").unwrap();
        assert_eq!(config, DesktopConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = DesktopConfig::from_json(
            r#"{ "group_windows": false, "cascade_step": 16.0, "default_min_size": { "width": 50.0, "height": 40.0 } }"#,
        )
        .unwrap();

        assert!(!config.group_windows);
        assert!(config.live_redraw);
        assert!((config.cascade_step - 16.0).abs() < 0.001);
        assert_eq!(config.default_min_size, Size::new(50.0, 40.0));
    }

    #[test]
    fn test_malformed_json() {
        let err = DesktopConfig::from_json("{ live_redraw: ").unwrap_err();
        assert!(matches!(err, DesktopError::Serialization(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = DesktopConfig::default();
        config.live_redraw = false;
        let restored = DesktopConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(restored, config);
    }
}
