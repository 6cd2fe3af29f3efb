//! Drag state for pointer operations

use crate::math::{Rect, Size, Vec2};
use crate::window::{ResizeDirection, WindowId};
use super::calculate_resize;

/// Current drag operation state
#[derive(Clone, Debug, PartialEq)]
pub enum DragState {
    /// Moving a window by its title region
    Move {
        /// Window being moved
        window_id: WindowId,
        /// Window bounds at start
        start_rect: Rect,
        /// Pointer position at start
        origin: Vec2,
    },
    /// Resizing a window by a border or corner
    Resize {
        /// Window being resized
        window_id: WindowId,
        /// Which edges move
        direction: ResizeDirection,
        /// Window bounds at start
        start_rect: Rect,
        /// Pointer position at start
        origin: Vec2,
        /// Minimum size of the window
        min_size: Size,
    },
}

impl DragState {
    /// Check if this is a window move operation
    #[inline]
    pub fn is_move(&self) -> bool {
        matches!(self, DragState::Move { .. })
    }

    /// Check if this is a window resize operation
    #[inline]
    pub fn is_resize(&self) -> bool {
        matches!(self, DragState::Resize { .. })
    }

    /// Window targeted by the drag
    pub fn window_id(&self) -> WindowId {
        match self {
            DragState::Move { window_id, .. } | DragState::Resize { window_id, .. } => *window_id,
        }
    }

    /// Pointer position where the drag started
    pub fn origin(&self) -> Vec2 {
        match self {
            DragState::Move { origin, .. } | DragState::Resize { origin, .. } => *origin,
        }
    }

    /// Bounds the window would take with the pointer at `pointer`
    pub fn target(&self, pointer: Vec2) -> Rect {
        match *self {
            DragState::Move { start_rect, origin, .. } => {
                let position = start_rect.position() + (pointer - origin);
                Rect::from_parts(position, start_rect.size())
            }
            DragState::Resize { direction, start_rect, origin, min_size, .. } => {
                calculate_resize(start_rect, direction, pointer - origin, min_size)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_state() {
        let state = DragState::Move {
            window_id: 42,
            start_rect: Rect::new(100.0, 100.0, 400.0, 300.0),
            origin: Vec2::new(150.0, 110.0),
        };

        assert!(state.is_move());
        assert!(!state.is_resize());
        assert_eq!(state.window_id(), 42);

        let target = state.target(Vec2::new(170.0, 90.0));
        assert!((target.x - 120.0).abs() < 0.001);
        assert!((target.y - 80.0).abs() < 0.001);
        assert!((target.width - 400.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_state_target() {
        let state = DragState::Resize {
            window_id: 7,
            direction: ResizeDirection::SE,
            start_rect: Rect::new(100.0, 100.0, 400.0, 300.0),
            origin: Vec2::new(500.0, 400.0),
            min_size: Size::new(100.0, 80.0),
        };

        assert!(state.is_resize());
        assert_eq!(state.window_id(), 7);

        let target = state.target(Vec2::new(520.0, 450.0));
        assert_eq!(target, Rect::new(100.0, 100.0, 420.0, 350.0));

        let collapsed = state.target(Vec2::new(0.0, 0.0));
        assert_eq!(collapsed.size(), Size::new(100.0, 80.0));
        assert_eq!(collapsed.position(), Vec2::new(100.0, 100.0));
    }
}
