//! Shared asset loader for the dsh desktop shell
//!
//! Applications running inside the shell share load-once assets (scripts,
//! stylesheets, sub-modules). This crate keeps one [`Resource`] per asset,
//! counts its owners, and unloads it when the last owner lets go.
//!
//! ## Architecture
//!
//! - [`resource`]: the reference-counted handle and its lifecycle
//! - [`manager`]: keyed registry, load dedup and owner bookkeeping
//! - [`loader`]: the environment seam that actually fetches assets
//! - [`owner`]: owner tokens (applications, windows, bootstrap ids)
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use dsh_resources::{AssetLoader, LoadFuture, OwnerToken, ResourceKind, ResourceManager};
//!
//! struct Instant;
//!
//! impl AssetLoader for Instant {
//!     fn load(&self, _kind: ResourceKind, _url: &str) -> LoadFuture {
//!         Box::pin(async { Ok::<(), String>(()) })
//!     }
//!     fn unload(&self, _kind: ResourceKind, _url: &str) {}
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let manager = ResourceManager::new(Rc::new(Instant));
//! let script = manager.fetch_script("/lib/ui.js", OwnerToken::Application(1)).await.unwrap();
//! assert_eq!(script.owner_count(), 1);
//! # });
//! ```
//!
//! Everything here is single-threaded: handles are `Rc`, state lives in
//! `Cell`/`RefCell`, and no borrow is held across an await point.

mod error;
pub mod loader;
pub mod manager;
pub mod owner;
pub mod resource;

pub use error::{ResourceError, ResourceResult};
pub use loader::{AssetLoader, LoadFuture};
pub use manager::ResourceManager;
pub use owner::OwnerToken;
pub use resource::{Resource, ResourceFlags, ResourceKey, ResourceKind, ResourceStage};
