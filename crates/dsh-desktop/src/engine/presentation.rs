//! Projection onto the presenter and full-surface layers

use tracing::{debug, error, warn};
use crate::app::AppId;
use crate::error::{DesktopError, DesktopResult};
use crate::window::{ClosePolicy, Lifecycle, WindowConfig, WindowId};
use super::DesktopEngine;

impl DesktopEngine {
    /// Push a window's bounds and visibility to its surface
    pub(crate) fn project(&mut self, id: WindowId) {
        let Some(window) = self.windows.get(id) else {
            return;
        };
        if window.stage() < Lifecycle::Initializing {
            return;
        }
        self.presenter.place(id, window.bounds());
        self.presenter.set_visible(id, window.is_shown());
    }

    /// Push every tracked window's z-index (1-based list position)
    pub(crate) fn sync_z(&mut self) {
        for (idx, &id) in self.windows.order().iter().enumerate() {
            self.presenter.set_z(id, idx + 1);
        }
    }

    // =========================================================================
    // Full-surface layers
    // =========================================================================

    /// Give a window the whole screen, on top of any earlier layer
    pub fn present(&mut self, id: WindowId) -> DesktopResult<()> {
        let window = self.windows.require(id)?;
        if !window.is_ready() {
            return Err(DesktopError::illegal("present", "window is not ready"));
        }
        self.full_surface.present(id);
        self.presenter.enter_full_surface(id);
        debug!(window_id = id, depth = self.full_surface.depth(), "full surface presented");
        Ok(())
    }

    /// Drop the top layer, returning to the one beneath or to the desktop
    pub fn rewind(&mut self) -> Option<WindowId> {
        if self.full_surface.is_empty() {
            return None;
        }
        self.full_surface.rewind();
        self.present_top_layer()
    }

    /// Drop every layer and return to the desktop
    pub fn leave_all(&mut self) {
        if self.full_surface.leave_all() {
            self.presenter.exit_full_surface();
            debug!("left full surface");
        }
    }

    /// The backend left full-surface on its own (for example the user
    /// pressed escape). The stack no longer reflects reality, so drop it.
    pub fn full_surface_exited(&mut self) {
        if self.full_surface.leave_all() {
            debug!("full surface exited out of band");
        }
    }

    /// Windows presented full-surface, top last
    pub fn full_surface_top(&self) -> Option<WindowId> {
        self.full_surface.top()
    }

    pub(crate) fn present_top_layer(&mut self) -> Option<WindowId> {
        match self.full_surface.top() {
            Some(top) => {
                self.presenter.enter_full_surface(top);
                Some(top)
            }
            None => {
                self.presenter.exit_full_surface();
                None
            }
        }
    }

    // =========================================================================
    // Failures
    // =========================================================================

    /// Replace the desktop with a fallback notice after an unrecoverable
    /// error
    pub fn report_fatal(&mut self, message: &str) {
        error!(%message, "fatal error");
        self.leave_all();
        self.cancel_drag();
        self.presenter.show_fallback_notice(message);
    }

    /// Show a dismissible error window for an application.
    ///
    /// If the window cannot be created the error is escalated to the
    /// fallback notice.
    pub fn show_error_dialog(&mut self, app_id: AppId, message: &str) -> DesktopResult<WindowId> {
        match self.open_error_window(app_id, message) {
            Ok(id) => Ok(id),
            Err(err) => {
                warn!(app_id, %err, "error dialog failed");
                self.report_fatal(message);
                Err(err)
            }
        }
    }

    fn open_error_window(&mut self, app_id: AppId, message: &str) -> DesktopResult<WindowId> {
        let parent = self
            .apps
            .get(&app_id)
            .ok_or(DesktopError::ApplicationNotFound(app_id))?
            .main_window;

        let id = self.create_window(app_id, WindowConfig {
            title: message.to_string(),
            parent,
            close_policy: ClosePolicy::Dispose,
            resizable: false,
            ..Default::default()
        })?;
        self.init_window(id)?;
        self.set_visible(id, true)?;
        Ok(id)
    }
}
