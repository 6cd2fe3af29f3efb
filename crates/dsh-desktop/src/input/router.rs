//! Input router state machine

use crate::math::{Rect, Size, Vec2};
use crate::window::{ResizeDirection, WindowId};
use super::DragState;

/// Input router holding at most one drag and the placeholder rectangle
/// shown while live redraw is off.
pub struct InputRouter {
    /// Current drag state
    drag: Option<DragState>,
    /// Bounds to commit on pointer-up when live redraw is off
    pending: Option<Rect>,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputRouter {
    /// Create a new input router
    pub fn new() -> Self {
        Self {
            drag: None,
            pending: None,
        }
    }

    /// Get current drag state
    #[inline]
    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Check if currently dragging
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start window move operation
    pub fn start_move(&mut self, window_id: WindowId, start_rect: Rect, origin: Vec2) {
        self.pending = None;
        self.drag = Some(DragState::Move {
            window_id,
            start_rect,
            origin,
        });
    }

    /// Start window resize operation
    pub fn start_resize(
        &mut self,
        window_id: WindowId,
        direction: ResizeDirection,
        start_rect: Rect,
        origin: Vec2,
        min_size: Size,
    ) {
        self.pending = None;
        self.drag = Some(DragState::Resize {
            window_id,
            direction,
            start_rect,
            origin,
            min_size,
        });
    }

    /// Restart the current move from new bounds and pointer origin
    pub fn recenter(&mut self, start_rect: Rect, origin: Vec2) {
        if let Some(DragState::Move { window_id, .. }) = self.drag {
            self.drag = Some(DragState::Move {
                window_id,
                start_rect,
                origin,
            });
        }
    }

    /// Record bounds to commit when the drag ends
    pub fn set_pending(&mut self, rect: Rect) {
        self.pending = Some(rect);
    }

    /// Bounds awaiting commit
    #[inline]
    pub fn pending(&self) -> Option<Rect> {
        self.pending
    }

    /// End current drag operation, returning it with any uncommitted bounds
    pub fn end_drag(&mut self) -> Option<(DragState, Option<Rect>)> {
        let pending = self.pending.take();
        self.drag.take().map(|drag| (drag, pending))
    }

    /// Drop the current drag without committing anything
    pub fn cancel(&mut self) {
        self.drag = None;
        self.pending = None;
    }

    /// Cancel the drag if it targets `window_id`. Returns whether it did.
    pub fn abandon(&mut self, window_id: WindowId) -> bool {
        match &self.drag {
            Some(drag) if drag.window_id() == window_id => {
                self.cancel();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_router_move() {
        let mut router = InputRouter::new();
        assert!(!router.is_dragging());

        router.start_move(1, Rect::new(0.0, 0.0, 200.0, 100.0), Vec2::new(10.0, 10.0));
        assert!(router.is_dragging());
        assert!(matches!(
            router.drag_state(),
            Some(DragState::Move { window_id: 1, .. })
        ));

        let (drag, pending) = router.end_drag().unwrap();
        assert!(drag.is_move());
        assert!(pending.is_none());
        assert!(!router.is_dragging());
        assert!(router.end_drag().is_none());
    }

    #[test]
    fn test_input_router_resize_with_pending() {
        let mut router = InputRouter::new();

        router.start_resize(
            1,
            ResizeDirection::SE,
            Rect::new(100.0, 100.0, 400.0, 300.0),
            Vec2::new(500.0, 400.0),
            Size::new(100.0, 80.0),
        );
        router.set_pending(Rect::new(100.0, 100.0, 450.0, 320.0));

        let (drag, pending) = router.end_drag().unwrap();
        assert!(drag.is_resize());
        assert_eq!(pending, Some(Rect::new(100.0, 100.0, 450.0, 320.0)));
        assert!(router.pending().is_none());
    }

    #[test]
    fn test_recenter_only_applies_to_moves() {
        let mut router = InputRouter::new();
        router.start_move(3, Rect::new(0.0, 0.0, 1920.0, 1040.0), Vec2::new(900.0, 10.0));
        router.recenter(Rect::new(700.0, 25.0, 400.0, 300.0), Vec2::new(900.0, 40.0));

        let target = router.drag_state().unwrap().target(Vec2::new(910.0, 50.0));
        assert_eq!(target, Rect::new(710.0, 35.0, 400.0, 300.0));
    }

    #[test]
    fn test_abandon_matches_window() {
        let mut router = InputRouter::new();
        router.start_move(5, Rect::new(0.0, 0.0, 200.0, 100.0), Vec2::ZERO);
        router.set_pending(Rect::new(10.0, 0.0, 200.0, 100.0));

        assert!(!router.abandon(6));
        assert!(router.is_dragging());

        assert!(router.abandon(5));
        assert!(!router.is_dragging());
        assert!(router.pending().is_none());
    }
}
