//! Window module
//!
//! Window state and lifecycle, close events, resize directions and the
//! z-ordered window manager.

#[allow(clippy::module_inception)]
mod window;
mod config;
mod direction;
mod events;
mod manager;

pub use window::{ClosePolicy, DisplayState, Lifecycle, Restored, Window};
pub use config::WindowConfig;
pub use direction::ResizeDirection;
pub use events::{EventHandler, WindowEvent, WindowEventKind, WindowEvents};
pub use manager::{resize_zone, WindowManager};

/// Unique window identifier
pub type WindowId = u64;
