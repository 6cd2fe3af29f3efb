//! Window lifecycle, geometry and display state

use dsh_resources::OwnerToken;
use tracing::{debug, info, warn};
use crate::app::AppId;
use crate::error::{DesktopError, DesktopResult};
use crate::math::{Rect, Size, Vec2};
use crate::persistence::SavedBounds;
use crate::taskbar::{GroupId, TaskbarAction};
use crate::window::{
    ClosePolicy, DisplayState, EventHandler, Lifecycle, Restored, Window, WindowConfig,
    WindowEvent, WindowEventKind, WindowEvents, WindowId,
};
use super::DesktopEngine;

/// What a close request ended up doing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseOutcome {
    /// A `closing` handler canceled the request
    Canceled,
    /// The close policy ignores close requests
    Ignored,
    /// The window was hidden and stays alive
    Hidden,
    /// The window was disposed
    Disposed,
    /// The owning application exited
    ApplicationExited,
    /// The window was already gone
    AlreadyClosed,
}

impl DesktopEngine {
    // =========================================================================
    // Creation and lifecycle
    // =========================================================================

    /// Create a window owned by an application
    pub fn create_window(&mut self, app_id: AppId, config: WindowConfig) -> DesktopResult<WindowId> {
        if !self.apps.contains_key(&app_id) {
            return Err(DesktopError::Internal(format!(
                "window created for unknown application {}",
                app_id
            )));
        }
        if let Some(parent) = config.parent {
            self.live_window(parent, "create")?;
        }

        let parent = config.parent;
        let id = self
            .windows
            .create(app_id, config, self.config.default_min_size);

        if let Some(parent) = parent.and_then(|p| self.windows.get_mut(p)) {
            parent.children.push(id);
        }
        if let Some(app) = self.apps.get_mut(&app_id) {
            app.windows.push(id);
        }
        self.events.insert(id, WindowEvents::default());

        debug!(window_id = id, app_id, "window created");
        Ok(id)
    }

    /// Initialize a window: attach its surface, apply saved or default
    /// geometry and start tracking it in the z-order.
    ///
    /// The first window initialized for an application becomes its main
    /// window and picks up the bounds saved when the previous main window
    /// was disposed.
    pub fn init_window(&mut self, id: WindowId) -> DesktopResult<()> {
        let window = self.live_window_mut(id, "init")?;
        window.begin_init()?;
        let app_id = window.app_id;

        self.presenter.attach_surface(id);

        let saved = match self.apps.get_mut(&app_id) {
            Some(app) if app.main_window.is_none() => {
                app.main_window = Some(id);
                app.bounds_key()
                    .and_then(|key| self.store.load(&key).map(|value| (key, value)))
            }
            _ => None,
        };

        if let Some((key, value)) = saved {
            match SavedBounds::from_json(&value) {
                Ok(bounds) => self.apply_saved_bounds(id, bounds),
                Err(err) => warn!(window_id = id, %key, %err, "ignoring unreadable saved bounds"),
            }
        }

        self.windows.add_window(id)?;
        if let Some(window) = self.windows.get_mut(id) {
            window.finish_init();
            let title = window.title.clone();
            self.presenter.set_title(id, &title);
        }

        self.project(id);
        self.sync_z();
        debug!(window_id = id, app_id, "window initialized");
        Ok(())
    }

    fn apply_saved_bounds(&mut self, id: WindowId, saved: SavedBounds) {
        let area = self.area;
        if let Some(window) = self.windows.get_mut(id) {
            let rect = saved.rect();
            window.set_position(rect.position());
            window.set_size(rect.size());
            if saved.maximized() {
                window.maximize(area);
            }
            debug!(window_id = id, maximized = saved.maximized(), "saved bounds applied");
        }
    }

    /// Request a close: raise `closing`, then run the close policy unless a
    /// handler canceled.
    ///
    /// Closing a window that is already gone is not an error.
    pub fn close(&mut self, id: WindowId) -> DesktopResult<CloseOutcome> {
        if self.windows.is_retired(id) {
            return Ok(CloseOutcome::AlreadyClosed);
        }
        let window = self.windows.require(id)?;
        if !window.is_ready() {
            return match window.stage() {
                Lifecycle::Disposing => Ok(CloseOutcome::AlreadyClosed),
                _ => Err(DesktopError::illegal("close", "window is not ready")),
            };
        }
        let policy = window.close_policy;
        let app_id = window.app_id;

        let event = self.emit(id, WindowEvent::new(id, WindowEventKind::Closing));
        if event.is_canceled() {
            debug!(window_id = id, "close canceled");
            return Ok(CloseOutcome::Canceled);
        }

        match policy {
            ClosePolicy::NoOp => Ok(CloseOutcome::Ignored),
            ClosePolicy::Hide => {
                self.set_visible(id, false)?;
                Ok(CloseOutcome::Hidden)
            }
            ClosePolicy::Dispose => {
                self.dispose_window(id)?;
                Ok(CloseOutcome::Disposed)
            }
            ClosePolicy::ExitApplication => {
                self.exit_application(app_id)?;
                Ok(CloseOutcome::ApplicationExited)
            }
        }
    }

    /// Dispose a ready window.
    ///
    /// Children go first; ready ones get a `closing` notice they cannot
    /// cancel. The window then leaves the taskbar, the z-order
    /// and the full-surface stack, any drag on it is abandoned, and every
    /// resource it holds is released (fetches still in flight for it are
    /// abandoned too). A main window saves its bounds before `closed` fires.
    pub fn dispose_window(&mut self, id: WindowId) -> DesktopResult<()> {
        let window = self.live_window_mut(id, "dispose")?;
        window.begin_dispose()?;
        let children = window.children.clone();
        let app_id = window.app_id;
        let parent = window.parent;

        for child in children {
            let stage = self.windows.get(child).map(Window::stage);
            match stage {
                Some(Lifecycle::Ready) => {
                    self.emit(child, WindowEvent::notice(child, WindowEventKind::Closing));
                    if let Err(err) = self.dispose_window(child) {
                        warn!(window_id = child, %err, "child disposal failed");
                    }
                }
                Some(Lifecycle::Uninitialized) => self.forget_window(child),
                _ => {}
            }
        }

        self.taskbar.remove_window(id);
        self.windows.remove_window(id);
        if self.input.abandon(id) {
            self.presenter.hide_placeholder();
            debug!(window_id = id, "drag abandoned");
        }
        if self.full_surface.remove(id) {
            self.present_top_layer();
        }

        let released = self.resources.sever(OwnerToken::Window(id));
        self.persist_if_main(id, app_id);

        if let Some(parent) = parent.and_then(|p| self.windows.get_mut(p)) {
            parent.children.retain(|&c| c != id);
        }
        if let Some(app) = self.apps.get_mut(&app_id) {
            app.windows.retain(|&w| w != id);
        }

        self.presenter.detach_surface(id);
        if let Some(window) = self.windows.get_mut(id) {
            window.finish_dispose();
        }
        self.emit(id, WindowEvent::new(id, WindowEventKind::Closed));

        self.events.remove(&id);
        self.windows.destroy(id);
        self.sync_z();

        info!(window_id = id, app_id, released, "window disposed");
        Ok(())
    }

    fn persist_if_main(&mut self, id: WindowId, app_id: AppId) {
        let Some(app) = self.apps.get_mut(&app_id) else {
            return;
        };
        if app.main_window != Some(id) {
            return;
        }
        app.main_window = None;

        let (Some(key), Some(window)) = (app.bounds_key(), self.windows.get(id)) else {
            return;
        };
        match SavedBounds::from_window(window).to_json() {
            Ok(value) => self.store.store(&key, value),
            Err(err) => warn!(window_id = id, %key, %err, "failed to save bounds"),
        }
    }

    /// Drop a window that never finished initializing
    pub(crate) fn forget_window(&mut self, id: WindowId) {
        let Some(window) = self.windows.destroy(id) else {
            return;
        };
        for child in window.children {
            self.forget_window(child);
        }
        if let Some(parent) = window.parent.and_then(|p| self.windows.get_mut(p)) {
            parent.children.retain(|&c| c != id);
        }
        if let Some(app) = self.apps.get_mut(&window.app_id) {
            app.windows.retain(|&w| w != id);
        }
        self.resources.sever(OwnerToken::Window(id));
        self.presenter.detach_surface(id);
        self.events.remove(&id);
        debug!(window_id = id, "uninitialized window dropped");
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Move a window. While maximized the restore rectangle moves instead.
    pub fn set_position(&mut self, id: WindowId, position: Vec2) -> DesktopResult<()> {
        let window = self.live_window_mut(id, "set_position")?;
        if window.set_position(position) {
            self.project(id);
        }
        Ok(())
    }

    /// Resize a window, clamped to its minimum size
    pub fn set_size(&mut self, id: WindowId, size: Size) -> DesktopResult<()> {
        let window = self.live_window_mut(id, "set_size")?;
        if window.set_size(size).is_some() {
            self.project(id);
            self.emit_resize(id);
        }
        Ok(())
    }

    /// Set position and size together
    pub fn set_bounds(&mut self, id: WindowId, bounds: Rect) -> DesktopResult<()> {
        let window = self.live_window_mut(id, "set_bounds")?;
        let moved = window.set_position(bounds.position());
        let resized = window.set_size(bounds.size()).is_some();
        if moved || resized {
            self.project(id);
        }
        if resized {
            self.emit_resize(id);
        }
        Ok(())
    }

    /// Live bounds of a window
    pub fn bounds(&self, id: WindowId) -> DesktopResult<Rect> {
        Ok(self.windows.require(id)?.bounds())
    }

    // =========================================================================
    // Display state
    // =========================================================================

    /// Display state of a window
    pub fn display_state(&self, id: WindowId) -> DesktopResult<DisplayState> {
        Ok(self.windows.require(id)?.display_state())
    }

    /// Enter or leave maximized. Idempotent.
    pub fn set_maximized(&mut self, id: WindowId, maximized: bool) -> DesktopResult<()> {
        let area = self.area;
        let window = self.live_window_mut(id, "set_maximized")?;
        let before = window.size();
        let was_shown = window.is_shown();

        let changed = if maximized {
            window.maximize(area)
        } else {
            window.unmaximize()
        };
        if !changed {
            return Ok(());
        }
        let resized = window.size() != before;
        let shown = window.is_shown();

        self.project(id);
        if shown && !was_shown {
            self.raise(id);
        }
        if resized {
            self.emit_resize(id);
        }
        debug!(window_id = id, maximized, "maximize toggled");
        Ok(())
    }

    /// Hide a window behind the minimized overlay
    pub fn minimize(&mut self, id: WindowId) -> DesktopResult<()> {
        let window = self.live_window_mut(id, "minimize")?;
        if window.minimize() {
            if self.input.abandon(id) {
                self.presenter.hide_placeholder();
            }
            self.presenter.set_visible(id, false);
            debug!(window_id = id, "window minimized");
        }
        Ok(())
    }

    /// Undo minimize, returning to whatever it covered; otherwise leave
    /// maximized
    pub fn restore(&mut self, id: WindowId) -> DesktopResult<Restored> {
        let window = self.live_window_mut(id, "restore")?;
        let before = window.size();
        let restored = window.restore();
        let resized = window.size() != before;

        match restored {
            Restored::Minimize => {
                self.project(id);
                self.raise(id);
            }
            Restored::Maximize => self.project(id),
            Restored::Nothing => {}
        }
        if resized {
            self.emit_resize(id);
        }
        Ok(restored)
    }

    /// Show or hide a ready window.
    ///
    /// The first show packs and places the window unless the application
    /// gave it explicit geometry, and registers it with the taskbar.
    pub fn set_visible(&mut self, id: WindowId, visible: bool) -> DesktopResult<()> {
        let window = self.live_window(id, "set_visible")?;
        if !window.is_ready() {
            return Err(DesktopError::illegal("set_visible", "window is not ready"));
        }
        if window.is_visible() == visible {
            return Ok(());
        }

        if visible && !window.has_been_shown() {
            self.first_show(id);
        }

        if let Some(window) = self.windows.get_mut(id) {
            window.set_visible(visible);
        }
        if visible {
            self.project(id);
            self.raise(id);
        } else {
            if self.input.abandon(id) {
                self.presenter.hide_placeholder();
            }
            self.presenter.set_visible(id, false);
        }
        Ok(())
    }

    fn first_show(&mut self, id: WindowId) {
        let Some(window) = self.windows.get(id) else {
            return;
        };
        let (explicit_size, explicit_position) = (window.explicit_size, window.explicit_position);
        let app_id = window.app_id;

        if !explicit_size {
            self.pack(id);
        }
        if !explicit_position {
            self.place_new(id);
        }

        let grouped = self.config.group_windows
            && self
                .apps
                .get(&app_id)
                .is_some_and(|app| !app.no_window_grouping);
        let group = self.taskbar.add_window(id, app_id, grouped);
        if let Some(window) = self.windows.get_mut(id) {
            window.in_taskbar = true;
        }
        debug!(window_id = id, group, "window shown for the first time");
    }

    /// Change a window's title
    pub fn set_title(&mut self, id: WindowId, title: &str) -> DesktopResult<()> {
        let window = self.live_window_mut(id, "set_title")?;
        window.title = title.to_string();
        if window.stage() >= Lifecycle::Initializing {
            self.presenter.set_title(id, title);
        }
        Ok(())
    }

    // =========================================================================
    // Ordering and events
    // =========================================================================

    /// Move a window to the front
    pub fn bring_to_front(&mut self, id: WindowId) -> DesktopResult<()> {
        self.windows.bring_to_front(id)?;
        self.sync_z();
        Ok(())
    }

    /// Subscribe to a window event
    pub fn on(&mut self, id: WindowId, kind: WindowEventKind, handler: EventHandler) -> DesktopResult<()> {
        self.live_window(id, "on")?;
        self.events.entry(id).or_default().on(kind, handler);
        Ok(())
    }

    /// Deliver `backnav` to the frontmost shown window. If no handler
    /// cancels it the window receives a close request.
    ///
    /// Returns `None` when no window is shown.
    pub fn back_navigation(&mut self) -> DesktopResult<Option<CloseOutcome>> {
        let Some(id) = self.windows.focused() else {
            return Ok(None);
        };
        let event = self.emit(id, WindowEvent::new(id, WindowEventKind::BackNav));
        if event.is_canceled() {
            return Ok(Some(CloseOutcome::Canceled));
        }
        self.close(id).map(Some)
    }

    /// Activate a taskbar group.
    ///
    /// A single-window group toggles its window: a minimized or hidden
    /// window comes back, the focused window is minimized, any other window
    /// is raised. A multi-window group hands back the selector to open.
    pub fn activate_taskbar_group(&mut self, group_id: GroupId) -> DesktopResult<Option<TaskbarAction>> {
        let Some(action) = self.taskbar.activate(group_id) else {
            return Ok(None);
        };
        let TaskbarAction::ToggleWindow(id) = action else {
            return Ok(Some(action));
        };

        let window = self.live_window(id, "activate")?;
        if !window.is_visible() {
            self.set_visible(id, true)?;
        } else if window.is_minimized() {
            self.restore(id)?;
        } else if self.windows.focused() == Some(id) {
            self.minimize(id)?;
        } else {
            self.bring_to_front(id)?;
        }
        Ok(None)
    }

    pub(crate) fn emit(&mut self, id: WindowId, mut event: WindowEvent) -> WindowEvent {
        if let Some(events) = self.events.get_mut(&id) {
            events.dispatch(&mut event);
        }
        event
    }

    pub(crate) fn emit_resize(&mut self, id: WindowId) {
        if let Some(size) = self.windows.get(id).map(Window::size) {
            self.emit(id, WindowEvent::resize(id, size));
        }
    }

    // =========================================================================
    // Lookup helpers
    // =========================================================================

    fn live_window(&self, id: WindowId, op: &'static str) -> DesktopResult<&Window> {
        if self.windows.is_retired(id) {
            return Err(DesktopError::illegal(op, "window is disposed"));
        }
        self.windows.require(id)
    }

    fn live_window_mut(&mut self, id: WindowId, op: &'static str) -> DesktopResult<&mut Window> {
        if self.windows.is_retired(id) {
            return Err(DesktopError::illegal(op, "window is disposed"));
        }
        self.windows.require_mut(id)
    }

    /// Bring a window to the front if it is tracked
    fn raise(&mut self, id: WindowId) {
        if self.windows.bring_to_front(id).is_ok() {
            self.sync_z();
        }
    }
}
