//! Geometry primitives
//!
//! All coordinates are in the compositing area's space, in logical pixels.

mod rect;
mod size;
mod vec2;

pub use rect::Rect;
pub use size::Size;
pub use vec2::Vec2;
