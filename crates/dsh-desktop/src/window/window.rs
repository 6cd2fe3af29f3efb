//! Window state: geometry, display state, lifecycle

use serde::{Deserialize, Serialize};
use crate::app::AppId;
use crate::error::{DesktopError, DesktopResult};
use crate::math::{Rect, Size, Vec2};
use super::{WindowConfig, WindowId};

/// Lifecycle stage of a window. Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lifecycle {
    Uninitialized,
    Initializing,
    Ready,
    Disposing,
    Disposed,
}

/// Visible state of a window, derived from its display flags
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayState {
    Hidden,
    Minimized,
    Normal,
    Maximized,
}

impl DisplayState {
    /// Derive the display state from the three display flags
    pub fn derive(visible: bool, minimized: bool, maximized: bool) -> Self {
        if !visible {
            DisplayState::Hidden
        } else if minimized {
            DisplayState::Minimized
        } else if maximized {
            DisplayState::Maximized
        } else {
            DisplayState::Normal
        }
    }
}

/// What happens when a close request is not canceled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosePolicy {
    /// Ignore the request
    NoOp,
    /// Hide the window and keep it alive
    Hide,
    /// Dispose the window
    #[default]
    Dispose,
    /// Exit the owning application
    ExitApplication,
}

/// What a call to [`Window::restore`] undid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Restored {
    /// Left the minimized overlay
    Minimize,
    /// Left maximized
    Maximize,
    /// Window was already normal
    Nothing,
}

/// A single window
#[derive(Clone, Debug)]
pub struct Window {
    /// Unique identifier
    pub id: WindowId,
    /// Owning application (immutable)
    pub app_id: AppId,
    /// Window title
    pub title: String,
    /// Owner window, if this is a child
    pub parent: Option<WindowId>,
    /// Child windows closed along with this one
    pub children: Vec<WindowId>,
    /// Default reaction to an uncanceled close request
    pub close_policy: ClosePolicy,
    /// Whether border drags resize this window
    pub resizable: bool,
    /// Minimum size constraint
    pub min_size: Size,
    pub(crate) position: Vec2,
    pub(crate) size: Size,
    pub(crate) restore_rect: Rect,
    pub(crate) stage: Lifecycle,
    visible: bool,
    minimized: bool,
    maximized: bool,
    /// Set while the minimized overlay hides a maximized window
    maximized_under_minimize: bool,
    pub(crate) explicit_size: bool,
    pub(crate) explicit_position: bool,
    pub(crate) shown_once: bool,
    pub(crate) in_taskbar: bool,
}

impl Window {
    pub(crate) fn new(id: WindowId, app_id: AppId, config: WindowConfig, default_min: Size) -> Self {
        let min_size = config.min_size.unwrap_or(default_min);
        let size = config.size.map_or(min_size, |s| s.at_least(min_size));
        let position = config.position.unwrap_or(Vec2::ZERO);

        Self {
            id,
            app_id,
            title: config.title,
            parent: config.parent,
            children: Vec::new(),
            close_policy: config.close_policy,
            resizable: config.resizable,
            min_size,
            position,
            size,
            restore_rect: Rect::from_parts(position, size),
            stage: Lifecycle::Uninitialized,
            visible: false,
            minimized: false,
            maximized: false,
            maximized_under_minimize: false,
            explicit_size: config.size.is_some(),
            explicit_position: config.position.is_some(),
            shown_once: false,
            in_taskbar: false,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Live bounds
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    /// Bounds the window returns to when leaving maximize
    #[inline]
    pub fn restore_rect(&self) -> Rect {
        self.restore_rect
    }

    /// Bounds worth persisting: the restore rectangle while maximized
    pub fn normal_bounds(&self) -> Rect {
        if self.is_maximized_underneath() {
            self.restore_rect
        } else {
            self.bounds()
        }
    }

    #[inline]
    pub fn stage(&self) -> Lifecycle {
        self.stage
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.stage == Lifecycle::Ready
    }

    #[inline]
    pub fn display_state(&self) -> DisplayState {
        DisplayState::derive(self.visible, self.minimized, self.maximized)
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    #[inline]
    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// Maximized, possibly hidden under the minimized overlay
    #[inline]
    pub fn is_maximized_underneath(&self) -> bool {
        self.maximized || self.maximized_under_minimize
    }

    /// Shown on screen: visible and not minimized
    #[inline]
    pub fn is_shown(&self) -> bool {
        self.visible && !self.minimized
    }

    /// Whether the window has been shown at least once
    #[inline]
    pub fn has_been_shown(&self) -> bool {
        self.shown_once
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub(crate) fn begin_init(&mut self) -> DesktopResult<()> {
        if self.stage != Lifecycle::Uninitialized {
            return Err(DesktopError::illegal("init", "window already initialized"));
        }
        self.stage = Lifecycle::Initializing;
        Ok(())
    }

    pub(crate) fn finish_init(&mut self) {
        self.stage = Lifecycle::Ready;
    }

    pub(crate) fn begin_dispose(&mut self) -> DesktopResult<()> {
        if self.stage != Lifecycle::Ready {
            return Err(DesktopError::illegal("dispose", "window is not ready"));
        }
        self.stage = Lifecycle::Disposing;
        Ok(())
    }

    pub(crate) fn finish_dispose(&mut self) {
        self.stage = Lifecycle::Disposed;
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Move the window. While maximized the restore rectangle moves instead.
    ///
    /// Returns `true` if the live position changed.
    pub(crate) fn set_position(&mut self, position: Vec2) -> bool {
        self.explicit_position = true;
        if self.is_maximized_underneath() {
            self.restore_rect.x = position.x;
            self.restore_rect.y = position.y;
            return false;
        }
        let changed = self.position != position;
        self.position = position;
        changed
    }

    /// Resize the window, clamped to its minimum size. While maximized the
    /// restore rectangle is resized instead.
    ///
    /// Returns the new live size if it changed.
    pub(crate) fn set_size(&mut self, size: Size) -> Option<Size> {
        let size = size.at_least(self.min_size);
        self.explicit_size = true;
        if self.is_maximized_underneath() {
            self.restore_rect.width = size.width;
            self.restore_rect.height = size.height;
            return None;
        }
        if self.size == size {
            return None;
        }
        self.size = size;
        Some(size)
    }

    /// Size computed by the compositor (packing); does not count as explicit.
    /// While maximized the restore rectangle takes the size.
    pub(crate) fn apply_packed_size(&mut self, size: Size) -> Option<Size> {
        let size = size.at_least(self.min_size);
        if self.is_maximized_underneath() {
            self.restore_rect.width = size.width;
            self.restore_rect.height = size.height;
            return None;
        }
        if self.size == size {
            return None;
        }
        self.size = size;
        Some(size)
    }

    /// Position chosen by the compositor (placement); does not count as
    /// explicit. While maximized the restore rectangle moves instead.
    pub(crate) fn apply_placed_position(&mut self, position: Vec2) {
        if self.is_maximized_underneath() {
            self.restore_rect.x = position.x;
            self.restore_rect.y = position.y;
        } else {
            self.position = position;
        }
    }

    // =========================================================================
    // Display state
    // =========================================================================

    pub(crate) fn set_visible(&mut self, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        if visible {
            self.shown_once = true;
        }
        true
    }

    /// Enter maximized, filling `area`. Clears the minimized overlay.
    ///
    /// Returns `false` if the window was already maximized.
    pub(crate) fn maximize(&mut self, area: Rect) -> bool {
        if self.maximized {
            return false;
        }
        if self.maximized_under_minimize {
            self.minimized = false;
            self.maximized_under_minimize = false;
            self.maximized = true;
            return true;
        }
        self.minimized = false;
        self.restore_rect = self.bounds();
        self.position = area.position();
        self.size = area.size();
        self.maximized = true;
        true
    }

    /// Leave maximized, returning to the restore rectangle.
    ///
    /// Returns `false` if the window was not maximized.
    pub(crate) fn unmaximize(&mut self) -> bool {
        if !self.is_maximized_underneath() {
            return false;
        }
        self.maximized = false;
        self.maximized_under_minimize = false;
        self.position = self.restore_rect.position();
        self.size = self.restore_rect.size();
        true
    }

    /// Put the minimized overlay over a normal or maximized window
    pub(crate) fn minimize(&mut self) -> bool {
        if self.minimized || !self.visible {
            return false;
        }
        self.minimized = true;
        if self.maximized {
            self.maximized = false;
            self.maximized_under_minimize = true;
        }
        true
    }

    /// Undo minimize if set, otherwise undo maximize
    pub(crate) fn restore(&mut self) -> Restored {
        if self.minimized {
            self.minimized = false;
            if self.maximized_under_minimize {
                self.maximized_under_minimize = false;
                self.maximized = true;
            }
            return Restored::Minimize;
        }
        if self.unmaximize() {
            return Restored::Maximize;
        }
        Restored::Nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(position: Vec2, size: Size) -> Window {
        Window::new(
            1,
            1,
            WindowConfig {
                title: "Test".to_string(),
                position: Some(position),
                size: Some(size),
                min_size: Some(Size::new(100.0, 80.0)),
                ..Default::default()
            },
            Size::new(120.0, 80.0),
        )
    }

    fn shown_window() -> Window {
        let mut w = window(Vec2::new(10.0, 10.0), Size::new(300.0, 200.0));
        w.set_visible(true);
        w
    }

    const AREA: Rect = Rect::new(0.0, 0.0, 1920.0, 1040.0);

    #[test]
    fn test_display_state_derivation() {
        assert_eq!(DisplayState::derive(false, false, false), DisplayState::Hidden);
        assert_eq!(DisplayState::derive(false, true, true), DisplayState::Hidden);
        assert_eq!(DisplayState::derive(true, true, false), DisplayState::Minimized);
        assert_eq!(DisplayState::derive(true, false, true), DisplayState::Maximized);
        assert_eq!(DisplayState::derive(true, false, false), DisplayState::Normal);
    }

    #[test]
    fn test_new_window_defaults() {
        let w = Window::new(3, 7, WindowConfig::default(), Size::new(120.0, 80.0));
        assert_eq!(w.stage(), Lifecycle::Uninitialized);
        assert_eq!(w.display_state(), DisplayState::Hidden);
        assert_eq!(w.size(), Size::new(120.0, 80.0));
        assert!(!w.explicit_size);
        assert!(!w.explicit_position);
        assert_eq!(w.close_policy, ClosePolicy::Dispose);
    }

    #[test]
    fn test_lifecycle_is_forward_only() {
        let mut w = window(Vec2::ZERO, Size::new(300.0, 200.0));

        assert!(w.begin_dispose().is_err());

        w.begin_init().unwrap();
        assert_eq!(w.stage(), Lifecycle::Initializing);
        w.finish_init();
        assert!(w.is_ready());

        let err = w.begin_init().unwrap_err();
        assert!(err.is_illegal_state());

        w.begin_dispose().unwrap();
        w.finish_dispose();
        assert_eq!(w.stage(), Lifecycle::Disposed);
        assert!(w.begin_dispose().is_err());
    }

    #[test]
    fn test_size_clamped_to_minimum() {
        let mut w = window(Vec2::ZERO, Size::new(300.0, 200.0));
        let resized = w.set_size(Size::new(20.0, 500.0));
        assert_eq!(resized, Some(Size::new(100.0, 500.0)));
        assert_eq!(w.set_size(Size::new(100.0, 500.0)), None);
    }

    #[test]
    fn test_maximize_restore_roundtrip() {
        let mut w = shown_window();
        let before = w.bounds();

        assert!(w.maximize(AREA));
        assert!(!w.maximize(AREA));
        assert_eq!(w.bounds(), AREA);
        assert_eq!(w.display_state(), DisplayState::Maximized);

        assert!(w.unmaximize());
        assert!(!w.unmaximize());
        assert_eq!(w.bounds(), before);
        assert_eq!(w.display_state(), DisplayState::Normal);
    }

    #[test]
    fn test_writes_while_maximized_target_restore_rect() {
        let mut w = shown_window();
        w.maximize(AREA);

        assert!(!w.set_position(Vec2::new(50.0, 60.0)));
        assert_eq!(w.set_size(Size::new(400.0, 300.0)), None);
        assert_eq!(w.bounds(), AREA);

        w.unmaximize();
        assert_eq!(w.bounds(), Rect::new(50.0, 60.0, 400.0, 300.0));
    }

    #[test]
    fn test_minimize_over_maximized_restores_to_maximized() {
        let mut w = shown_window();
        w.maximize(AREA);

        assert!(w.minimize());
        assert_eq!(w.display_state(), DisplayState::Minimized);
        assert!(!(w.is_minimized() && w.is_maximized()));

        assert_eq!(w.restore(), Restored::Minimize);
        assert_eq!(w.display_state(), DisplayState::Maximized);
        assert_eq!(w.bounds(), AREA);

        assert_eq!(w.restore(), Restored::Maximize);
        assert_eq!(w.display_state(), DisplayState::Normal);
        assert_eq!(w.restore(), Restored::Nothing);
    }

    #[test]
    fn test_minimize_requires_visible() {
        let mut w = window(Vec2::ZERO, Size::new(300.0, 200.0));
        assert!(!w.minimize());
        assert_eq!(w.display_state(), DisplayState::Hidden);
    }

    #[test]
    fn test_maximize_clears_minimize() {
        let mut w = shown_window();
        w.minimize();
        assert!(w.maximize(AREA));
        assert_eq!(w.display_state(), DisplayState::Maximized);
        assert!(!w.is_minimized());
    }

    #[test]
    fn test_compositor_geometry_while_maximized_targets_restore_rect() {
        let mut w = shown_window();
        w.maximize(AREA);

        assert_eq!(w.apply_packed_size(Size::new(640.0, 480.0)), None);
        w.apply_placed_position(Vec2::new(40.0, 40.0));
        assert_eq!(w.bounds(), AREA);
        assert!(!w.explicit_position);

        w.unmaximize();
        assert_eq!(w.bounds(), Rect::new(40.0, 40.0, 640.0, 480.0));
    }

    #[test]
    fn test_normal_bounds_while_maximized() {
        let mut w = shown_window();
        w.maximize(AREA);
        w.minimize();
        assert_eq!(w.normal_bounds(), Rect::new(10.0, 10.0, 300.0, 200.0));
    }
}
