//! Asset loading seam
//!
//! The shell does not know how assets reach it. A browser host injects
//! `<script>` tags, a native host may read files; either way it implements
//! [`AssetLoader`] and hands it to the [`ResourceManager`](crate::ResourceManager).

use std::future::Future;
use std::pin::Pin;
use crate::resource::ResourceKind;

/// Future returned by [`AssetLoader::load`].
///
/// Not `Send`: the shell runs on a single cooperative timeline.
pub type LoadFuture = Pin<Box<dyn Future<Output = Result<(), String>>>>;

/// Environment primitive that fetches and discards assets
pub trait AssetLoader {
    /// Start loading an asset. The future resolves once it is usable, or
    /// rejects with a human-readable reason.
    fn load(&self, kind: ResourceKind, url: &str) -> LoadFuture;

    /// Tear down a previously loaded asset.
    ///
    /// Called after the entry has left the registry, so a fetch for the same
    /// url started from here will load a fresh copy.
    fn unload(&self, kind: ResourceKind, url: &str);
}
