//! Window configuration for creation

use crate::math::{Size, Vec2};
use super::{ClosePolicy, WindowId};

/// Configuration for creating a window
#[derive(Clone, Debug)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial position (None = placed on first show)
    pub position: Option<Vec2>,
    /// Initial size (None = packed to content on first show)
    pub size: Option<Size>,
    /// Minimum size constraint (None = desktop default)
    pub min_size: Option<Size>,
    /// Owner window; closing it closes this one too
    pub parent: Option<WindowId>,
    /// Reaction to an uncanceled close request
    pub close_policy: ClosePolicy,
    /// Whether border drags resize this window
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            position: None,
            size: None,
            min_size: None,
            parent: None,
            close_policy: ClosePolicy::default(),
            resizable: true,
        }
    }
}
