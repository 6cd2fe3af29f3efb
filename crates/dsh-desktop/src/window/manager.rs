//! Window manager: window storage, z-order and hit testing

use std::collections::HashMap;
use crate::app::AppId;
use crate::error::{DesktopError, DesktopResult};
use crate::math::{Rect, Size, Vec2};
use super::{ResizeDirection, Window, WindowConfig, WindowId};

/// Window manager owning every window and the back-to-front stacking list.
///
/// A window exists in `windows` from creation until disposal, but only
/// appears in the stacking list once initialized. Its z-index is its 1-based
/// position in that list and is never stored anywhere else.
pub struct WindowManager {
    /// All windows by ID
    windows: HashMap<WindowId, Window>,
    /// Stacking order, back to front
    order: Vec<WindowId>,
    /// Next window ID
    next_id: u64,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowManager {
    /// Create a new window manager
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }

    /// Create an uninitialized window
    pub fn create(&mut self, app_id: AppId, config: WindowConfig, default_min: Size) -> WindowId {
        let id = self.next_id;
        self.next_id += 1;
        self.windows.insert(id, Window::new(id, app_id, config, default_min));
        id
    }

    /// Forget a window entirely
    pub fn destroy(&mut self, id: WindowId) -> Option<Window> {
        self.remove_window(id);
        self.windows.remove(&id)
    }

    /// Get a window by ID
    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    /// Get a mutable window by ID
    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(&id)
    }

    /// Get a window or fail with `WindowNotFound`
    pub fn require(&self, id: WindowId) -> DesktopResult<&Window> {
        self.windows.get(&id).ok_or(DesktopError::WindowNotFound(id))
    }

    /// Whether an ID was handed out and its window has since been destroyed.
    ///
    /// IDs are never reused, so this needs no record of past windows.
    pub fn is_retired(&self, id: WindowId) -> bool {
        id != 0 && id < self.next_id && !self.windows.contains_key(&id)
    }

    /// Mutable variant of [`WindowManager::require`]
    pub fn require_mut(&mut self, id: WindowId) -> DesktopResult<&mut Window> {
        self.windows.get_mut(&id).ok_or(DesktopError::WindowNotFound(id))
    }

    // =========================================================================
    // Stacking
    // =========================================================================

    /// Put a window on top of the stacking list
    pub fn add_window(&mut self, id: WindowId) -> DesktopResult<()> {
        if !self.windows.contains_key(&id) {
            return Err(DesktopError::WindowNotFound(id));
        }
        if !self.order.contains(&id) {
            self.order.push(id);
        }
        Ok(())
    }

    /// Take a window out of the stacking list.
    ///
    /// Returns whether it was present, so repeated removal is harmless.
    pub fn remove_window(&mut self, id: WindowId) -> bool {
        match self.order.iter().position(|&w| w == id) {
            Some(idx) => {
                self.order.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Move a window to the front of the stacking list
    pub fn bring_to_front(&mut self, id: WindowId) -> DesktopResult<()> {
        let idx = self
            .order
            .iter()
            .position(|&w| w == id)
            .ok_or(DesktopError::WindowNotTracked(id))?;
        let id = self.order.remove(idx);
        self.order.push(id);
        Ok(())
    }

    /// Check if a window is in the stacking list
    #[inline]
    pub fn is_tracked(&self, id: WindowId) -> bool {
        self.order.contains(&id)
    }

    /// 1-based z-index of a tracked window (front = highest)
    pub fn z_index(&self, id: WindowId) -> Option<usize> {
        self.order.iter().position(|&w| w == id).map(|idx| idx + 1)
    }

    /// Stacking list, back to front
    #[inline]
    pub fn order(&self) -> &[WindowId] {
        &self.order
    }

    /// Topmost window currently shown on screen
    pub fn focused(&self) -> Option<WindowId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|id| self.windows.get(id).is_some_and(Window::is_shown))
    }

    /// All windows, tracked or not
    pub fn all_windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.values()
    }

    /// Get the number of windows
    pub fn count(&self) -> usize {
        self.windows.len()
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    /// Shown windows, front to back
    fn front_to_back(&self) -> impl Iterator<Item = &Window> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.windows.get(id))
            .filter(|w| w.is_shown())
    }

    /// Find the topmost shown window at a position
    pub fn window_at(&self, pos: Vec2) -> Option<WindowId> {
        self.front_to_back()
            .find(|w| w.bounds().contains(pos))
            .map(|w| w.id)
    }

    /// Find the window whose title region is under the pointer.
    ///
    /// A window body covering the point hides anything beneath it.
    pub fn title_at(&self, pos: Vec2, title_height: f32) -> Option<WindowId> {
        let window = self.front_to_back().find(|w| w.bounds().contains(pos))?;
        if pos.y < window.position.y + title_height {
            Some(window.id)
        } else {
            None
        }
    }

    /// Find the resize zone of the topmost eligible window under the pointer.
    ///
    /// The zone reaches `inner` pixels inside the border and `outer` pixels
    /// outside it. Maximized and non-resizable windows have no zones but still
    /// occlude what lies beneath them.
    pub fn resize_zone_at(
        &self,
        pos: Vec2,
        inner: f32,
        outer: f32,
    ) -> Option<(WindowId, ResizeDirection)> {
        for window in self.front_to_back() {
            let rect = window.bounds();
            if window.resizable && !window.is_maximized() {
                if let Some(dir) = resize_zone(rect, pos, inner, outer) {
                    return Some((window.id, dir));
                }
            }
            if rect.contains(pos) {
                return None;
            }
        }
        None
    }
}

/// Direction of the border zone of `rect` containing `pos`, if any
pub fn resize_zone(rect: Rect, pos: Vec2, inner: f32, outer: f32) -> Option<ResizeDirection> {
    if !rect.inflate(outer).contains(pos) {
        return None;
    }

    let x = if pos.x < rect.x + inner {
        -1
    } else if pos.x >= rect.right() - inner {
        1
    } else {
        0
    };
    let y = if pos.y < rect.y + inner {
        -1
    } else if pos.y >= rect.bottom() - inner {
        1
    } else {
        0
    };

    let dir = ResizeDirection::new(x, y);
    if dir.is_none() {
        None
    } else {
        Some(dir)
    }
}
