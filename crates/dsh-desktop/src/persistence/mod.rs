//! Persistence module
//!
//! Saves the main window's last bounds per application identity.

mod bounds;
mod store;

pub use bounds::SavedBounds;
pub use store::{BoundsStore, MemoryStore};
