//! Input routing module
//!
//! Provides the pointer state machine for drag-move and drag-resize.

mod router;
mod drag;
mod result;

pub use router::InputRouter;
pub use drag::DragState;
pub use result::InputResult;

use crate::math::{Rect, Size, Vec2};
use crate::window::ResizeDirection;

/// Calculate new bounds after a resize drag.
///
/// Each axis grows by `delta * direction` and is clamped to `min`. When the
/// moving edge is the left or top one, the origin shifts by exactly the size
/// change that survived clamping, so the opposite edge stays put.
pub fn calculate_resize(start: Rect, direction: ResizeDirection, delta: Vec2, min: Size) -> Rect {
    let mut rect = start;

    if direction.x != 0 {
        let width = (start.width + delta.x * f32::from(direction.x)).max(min.width);
        if direction.x < 0 {
            rect.x = start.x + (start.width - width);
        }
        rect.width = width;
    }

    if direction.y != 0 {
        let height = (start.height + delta.y * f32::from(direction.y)).max(min.height);
        if direction.y < 0 {
            rect.y = start.y + (start.height - height);
        }
        rect.height = height;
    }

    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: Size = Size::new(100.0, 100.0);

    #[test]
    fn test_resize_south() {
        let rect = calculate_resize(
            Rect::new(100.0, 100.0, 400.0, 300.0),
            ResizeDirection::S,
            Vec2::new(0.0, 50.0),
            MIN,
        );
        assert!((rect.x - 100.0).abs() < 0.001);
        assert!((rect.y - 100.0).abs() < 0.001);
        assert!((rect.width - 400.0).abs() < 0.001);
        assert!((rect.height - 350.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_west_grows_leftwards() {
        let rect = calculate_resize(
            Rect::new(100.0, 100.0, 400.0, 300.0),
            ResizeDirection::W,
            Vec2::new(-50.0, 0.0),
            MIN,
        );
        assert!((rect.x - 50.0).abs() < 0.001);
        assert!((rect.width - 450.0).abs() < 0.001);
        assert!((rect.right() - 500.0).abs() < 0.001);
    }

    #[test]
    fn test_left_edge_clamp_keeps_right_edge() {
        let rect = calculate_resize(
            Rect::new(10.0, 10.0, 300.0, 200.0),
            ResizeDirection::W,
            Vec2::new(250.0, 0.0),
            MIN,
        );
        assert!((rect.width - 100.0).abs() < 0.001);
        assert!((rect.x - 210.0).abs() < 0.001);
        assert!((rect.right() - 310.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_northwest_corner() {
        let rect = calculate_resize(
            Rect::new(100.0, 100.0, 400.0, 300.0),
            ResizeDirection::NW,
            Vec2::new(30.0, -40.0),
            MIN,
        );
        assert!((rect.x - 130.0).abs() < 0.001);
        assert!((rect.y - 60.0).abs() < 0.001);
        assert!((rect.width - 370.0).abs() < 0.001);
        assert!((rect.height - 340.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_north_clamped() {
        let rect = calculate_resize(
            Rect::new(0.0, 0.0, 400.0, 150.0),
            ResizeDirection::N,
            Vec2::new(0.0, 500.0),
            MIN,
        );
        assert!((rect.height - 100.0).abs() < 0.001);
        assert!((rect.y - 50.0).abs() < 0.001);
        assert!((rect.bottom() - 150.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_none_is_identity() {
        let start = Rect::new(5.0, 6.0, 200.0, 150.0);
        let rect = calculate_resize(start, ResizeDirection::NONE, Vec2::new(40.0, 40.0), MIN);
        assert_eq!(rect, start);
    }
}
