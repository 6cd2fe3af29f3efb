//! Presentation seam
//!
//! The compositor never draws. It projects window state onto a
//! [`Presenter`], which a backend implements for its surface technology.

mod full_surface;
mod headless;

pub use full_surface::FullSurfaceStack;
pub use headless::{HeadlessPresenter, HeadlessState, SurfaceState};

use crate::math::{Rect, Size};
use crate::window::WindowId;

/// Backend receiving projected window state
pub trait Presenter {
    /// Create the surface backing a window
    fn attach_surface(&mut self, id: WindowId);

    /// Destroy the surface backing a window
    fn detach_surface(&mut self, id: WindowId);

    /// Position and size a surface
    fn place(&mut self, id: WindowId, rect: Rect);

    /// Set stacking position (1-based, higher is in front)
    fn set_z(&mut self, id: WindowId, z: usize);

    fn set_visible(&mut self, id: WindowId, visible: bool);

    fn set_title(&mut self, id: WindowId, title: &str);

    /// Natural size of a window's content. Called before first show while
    /// the surface is still hidden.
    fn measure_content(&mut self, id: WindowId) -> Size;

    /// Show the drag outline used when live redraw is off
    fn show_placeholder(&mut self, rect: Rect);

    fn hide_placeholder(&mut self);

    /// Set the pointer cursor shape (CSS cursor name)
    fn set_cursor(&mut self, cursor: &'static str);

    /// Give a window the whole screen
    fn enter_full_surface(&mut self, id: WindowId);

    /// Return the screen to the desktop
    fn exit_full_surface(&mut self);

    /// Replace everything with a full-screen notice after a fatal error
    fn show_fallback_notice(&mut self, message: &str);
}
