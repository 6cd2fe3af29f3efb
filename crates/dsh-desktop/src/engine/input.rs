//! Pointer event handling and drag operations

use tracing::{debug, warn};
use crate::input::{DragState, InputResult};
use crate::math::{Rect, Vec2};
use crate::window::{ResizeDirection, WindowId};
use super::DesktopEngine;

impl DesktopEngine {
    /// Handle pointer down
    ///
    /// Resize zones win over title regions because they reach outside the
    /// window border. A press anywhere else on a window raises it and is
    /// forwarded to its content.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> InputResult {
        let pos = Vec2::new(x, y);
        self.cancel_drag();

        let zone = self.windows.resize_zone_at(
            pos,
            self.config.resize_inner_margin,
            self.config.resize_outer_margin,
        );
        if let Some((window_id, direction)) = zone {
            return self.handle_resize_press(window_id, direction, pos);
        }

        if let Some(window_id) = self.windows.title_at(pos, self.config.title_bar_height) {
            return self.handle_title_press(window_id, pos);
        }

        match self.windows.window_at(pos) {
            Some(window_id) => self.handle_content_press(window_id, pos),
            None => InputResult::Unhandled,
        }
    }

    /// Handle press on a title region - starts a move drag
    fn handle_title_press(&mut self, window_id: WindowId, pos: Vec2) -> InputResult {
        self.raise_for_input(window_id);
        if let Some(window) = self.windows.get(window_id) {
            self.input.start_move(window_id, window.bounds(), pos);
            debug!(window_id, "move drag started");
        }
        InputResult::Handled
    }

    /// Handle press on a resize zone - starts a resize drag
    fn handle_resize_press(
        &mut self,
        window_id: WindowId,
        direction: ResizeDirection,
        pos: Vec2,
    ) -> InputResult {
        self.raise_for_input(window_id);
        if let Some(window) = self.windows.get(window_id) {
            self.input
                .start_resize(window_id, direction, window.bounds(), pos, window.min_size);
            self.presenter.set_cursor(direction.cursor());
            debug!(window_id, dx = direction.x, dy = direction.y, "resize drag started");
        }
        InputResult::Handled
    }

    /// Handle press on window content
    fn handle_content_press(&mut self, window_id: WindowId, pos: Vec2) -> InputResult {
        self.raise_for_input(window_id);
        let window = match self.windows.get(window_id) {
            Some(w) => w,
            None => return InputResult::Unhandled,
        };
        let local = pos - window.position();
        InputResult::Forward {
            window_id,
            local_x: local.x,
            local_y: local.y,
        }
    }

    /// Handle pointer move
    ///
    /// Without a drag this only updates the cursor hint.
    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> InputResult {
        let pos = Vec2::new(x, y);

        let drag = match self.input.drag_state() {
            Some(state) => state.clone(),
            None => {
                let cursor = self.cursor_hint_at(pos);
                self.presenter.set_cursor(cursor);
                return InputResult::Unhandled;
            }
        };

        let window_id = drag.window_id();
        let maximized = match self.windows.get(window_id) {
            Some(window) => window.is_maximized(),
            None => {
                self.cancel_drag();
                return InputResult::Unhandled;
            }
        };

        if let DragState::Move { start_rect, origin, .. } = drag {
            if maximized {
                if pos.y - origin.y > self.config.unmaximize_threshold {
                    self.pull_out_of_maximize(window_id, start_rect, origin, pos);
                }
                return InputResult::Handled;
            }
        }

        let target = drag.target(pos);
        if self.config.live_redraw {
            if let Err(err) = self.set_bounds(window_id, target) {
                warn!(window_id, %err, "drag update rejected");
            }
        } else {
            self.input.set_pending(target);
            self.presenter.show_placeholder(target);
        }
        InputResult::Handled
    }

    /// Leave maximize mid-drag and restart the move from the restored
    /// window, keeping the pointer at the same relative spot of the title
    fn pull_out_of_maximize(&mut self, window_id: WindowId, start_rect: Rect, origin: Vec2, pos: Vec2) {
        if self.set_maximized(window_id, false).is_err() {
            return;
        }
        let Some(size) = self.windows.get(window_id).map(|w| w.size()) else {
            return;
        };

        let ratio = if start_rect.width > 0.0 {
            (origin.x - start_rect.x) / start_rect.width
        } else {
            0.5
        };
        let grab = Vec2::new(size.width * ratio, origin.y - start_rect.y);
        let restored = Rect::from_parts(pos - grab, size);

        if let Err(err) = self.set_position(window_id, restored.position()) {
            warn!(window_id, %err, "restored window could not follow the pointer");
        }
        self.input.recenter(restored, pos);
        debug!(window_id, "drag pulled window out of maximize");
    }

    /// Handle pointer up
    ///
    /// Commits placeholder bounds when live redraw is off.
    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> InputResult {
        let Some((drag, pending)) = self.input.end_drag() else {
            return InputResult::Unhandled;
        };

        if let Some(rect) = pending {
            self.presenter.hide_placeholder();
            if let Err(err) = self.set_bounds(drag.window_id(), rect) {
                warn!(window_id = drag.window_id(), %err, "placeholder bounds not committed");
            }
        }

        let cursor = self.cursor_hint_at(Vec2::new(x, y));
        self.presenter.set_cursor(cursor);
        debug!(window_id = drag.window_id(), "drag finished");
        InputResult::Handled
    }

    /// Raise a window hit by the pointer
    fn raise_for_input(&mut self, window_id: WindowId) {
        if let Err(err) = self.bring_to_front(window_id) {
            warn!(window_id, %err, "pointer target could not be raised");
        }
    }

    /// Drop the current drag without committing it
    pub fn cancel_drag(&mut self) {
        if self.input.is_dragging() {
            if self.input.pending().is_some() {
                self.presenter.hide_placeholder();
            }
            self.input.cancel();
        }
    }

    /// Cursor shape for the pointer at `pos`, without starting anything
    pub fn cursor_hint_at(&self, pos: Vec2) -> &'static str {
        self.windows
            .resize_zone_at(
                pos,
                self.config.resize_inner_margin,
                self.config.resize_outer_margin,
            )
            .map_or("default", |(_, direction)| direction.cursor())
    }
}
