//! Reference-counted resource handle

use std::cell::{Cell, RefCell};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use crate::error::{ResourceError, ResourceResult};
use crate::owner::OwnerToken;

/// Kind of shared asset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Script,
    Style,
    Module,
}

impl ResourceKind {
    fn prefix(self) -> &'static str {
        match self {
            ResourceKind::Script => "script",
            ResourceKind::Style => "style",
            ResourceKind::Module => "module",
        }
    }
}

/// Registry key of a resource, derived from its kind and source locator.
///
/// The fragment of the URL is dropped and surrounding whitespace trimmed, so
/// `"/a.js#main"` and `"/a.js"` name the same script.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Build the key for an asset
    pub fn new(kind: ResourceKind, url: &str) -> Self {
        let url = url.trim();
        let locator = match url.find('#') {
            Some(idx) => &url[..idx],
            None => url,
        };
        Self(format!("{}:{}", kind.prefix(), locator))
    }

    /// Key as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Retention flags of a resource
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceFlags {
    /// Never unloaded when the last owner leaves (boot-time assets)
    pub permanent: bool,
    /// At most one owner at a time
    pub unique: bool,
}

impl ResourceFlags {
    /// Flags for an asset loaded once at boot
    pub const PERMANENT: ResourceFlags = ResourceFlags {
        permanent: true,
        unique: false,
    };

    /// Flags for an asset that only one owner may hold
    pub const UNIQUE: ResourceFlags = ResourceFlags {
        permanent: false,
        unique: true,
    };
}

/// Lifecycle stage of a resource
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStage {
    /// Loader has been asked for the asset
    Loading,
    /// Loaded and held by no one
    Idle,
    /// Loaded and held by at least one owner
    Owned,
    /// Torn down; the handle is dead
    Unloaded,
}

/// A shared asset and the set of owners keeping it alive.
///
/// Handles are shared as `Rc<Resource>`. Once a resource reaches
/// [`ResourceStage::Unloaded`] it never comes back; loading the same key again
/// creates a new `Resource`.
#[derive(Debug)]
pub struct Resource {
    key: ResourceKey,
    kind: ResourceKind,
    url: String,
    flags: ResourceFlags,
    owners: RefCell<Vec<OwnerToken>>,
    loaded: Cell<bool>,
    unloaded: Cell<bool>,
    /// Fetches currently suspended on the load
    waiters: Cell<usize>,
    /// Outcome of the single load shared by every concurrent fetch
    pub(crate) load: OnceCell<ResourceResult<()>>,
}

impl Resource {
    /// Create a resource whose load has not completed yet
    pub(crate) fn pending(kind: ResourceKind, url: &str, flags: ResourceFlags) -> Self {
        Self {
            key: ResourceKey::new(kind, url),
            kind,
            url: url.trim().to_string(),
            flags,
            owners: RefCell::new(Vec::new()),
            loaded: Cell::new(false),
            unloaded: Cell::new(false),
            waiters: Cell::new(0),
            load: OnceCell::new(),
        }
    }

    /// Create a resource the environment has already loaded
    pub(crate) fn preloaded(kind: ResourceKind, url: &str, flags: ResourceFlags) -> Self {
        let resource = Self::pending(kind, url, flags);
        resource.loaded.set(true);
        // A fresh cell always accepts its first value.
        let _ = resource.load.set(Ok(()));
        resource
    }

    #[inline]
    pub fn key(&self) -> &ResourceKey {
        &self.key
    }

    #[inline]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Locator the asset was fetched from
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn flags(&self) -> ResourceFlags {
        self.flags
    }

    /// Current lifecycle stage
    pub fn stage(&self) -> ResourceStage {
        if self.unloaded.get() {
            ResourceStage::Unloaded
        } else if !self.loaded.get() {
            ResourceStage::Loading
        } else if self.owners.borrow().is_empty() {
            ResourceStage::Idle
        } else {
            ResourceStage::Owned
        }
    }

    /// Check if the asset is loaded and still alive
    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.loaded.get() && !self.unloaded.get()
    }

    #[inline]
    pub fn is_unloaded(&self) -> bool {
        self.unloaded.get()
    }

    /// Snapshot of the current owners, in the order they were added
    pub fn owners(&self) -> Vec<OwnerToken> {
        self.owners.borrow().clone()
    }

    #[inline]
    pub fn owner_count(&self) -> usize {
        self.owners.borrow().len()
    }

    /// Check if the given token holds this resource
    pub fn is_owned_by(&self, owner: OwnerToken) -> bool {
        self.owners.borrow().contains(&owner)
    }

    pub(crate) fn mark_loaded(&self) {
        if !self.unloaded.get() {
            self.loaded.set(true);
        }
    }

    pub(crate) fn mark_unloaded(&self) {
        self.unloaded.set(true);
        self.owners.borrow_mut().clear();
    }

    /// Register an owner
    pub(crate) fn add_owner(&self, owner: OwnerToken) -> ResourceResult<()> {
        let mut owners = self.owners.borrow_mut();
        if owners.contains(&owner) {
            return Err(ResourceError::DuplicateOwner {
                key: self.key.clone(),
                owner,
            });
        }
        if self.flags.unique {
            if let Some(&holder) = owners.first() {
                return Err(ResourceError::UniqueViolation {
                    key: self.key.clone(),
                    holder,
                });
            }
        }
        owners.push(owner);
        Ok(())
    }

    /// Remove an owner, returning the number of owners left
    pub(crate) fn remove_owner(&self, owner: OwnerToken) -> ResourceResult<usize> {
        let mut owners = self.owners.borrow_mut();
        let idx = owners
            .iter()
            .position(|&o| o == owner)
            .ok_or_else(|| ResourceError::NotOwned {
                key: self.key.clone(),
                owner,
            })?;
        owners.remove(idx);
        Ok(owners.len())
    }

    /// Swap an owner in place, keeping the owner count unchanged
    pub(crate) fn replace_owner(&self, from: OwnerToken, to: OwnerToken) -> ResourceResult<()> {
        let mut owners = self.owners.borrow_mut();
        if owners.contains(&to) {
            return Err(ResourceError::DuplicateOwner {
                key: self.key.clone(),
                owner: to,
            });
        }
        match owners.iter_mut().find(|o| **o == from) {
            Some(slot) => {
                *slot = to;
                Ok(())
            }
            None => Err(ResourceError::NotOwned {
                key: self.key.clone(),
                owner: from,
            }),
        }
    }

    /// Whether dropping to zero owners should unload this resource
    #[inline]
    pub(crate) fn unloads_when_idle(&self) -> bool {
        !self.flags.permanent
    }

    /// Count a fetch as suspended on the load until the guard drops
    pub(crate) fn begin_wait(&self) -> WaitGuard<'_> {
        self.waiters.set(self.waiters.get() + 1);
        WaitGuard(self)
    }

    /// Number of fetches that have not yet resumed from the load
    #[inline]
    pub(crate) fn waiters(&self) -> usize {
        self.waiters.get()
    }
}

/// Marks one fetch as waiting on a [`Resource`] load
pub(crate) struct WaitGuard<'a>(&'a Resource);

impl Drop for WaitGuard<'_> {
    fn drop(&mut self) {
        let waiters = &self.0.waiters;
        waiters.set(waiters.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ignores_fragment_and_whitespace() {
        let a = ResourceKey::new(ResourceKind::Script, " /lib/a.js#init ");
        let b = ResourceKey::new(ResourceKind::Script, "/lib/a.js");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "script:/lib/a.js");
    }

    #[test]
    fn test_key_distinguishes_kinds() {
        let script = ResourceKey::new(ResourceKind::Script, "/a");
        let module = ResourceKey::new(ResourceKind::Module, "/a");
        assert_ne!(script, module);
    }

    #[test]
    fn test_stage_progression() {
        let res = Resource::pending(ResourceKind::Style, "/a.css", ResourceFlags::default());
        assert_eq!(res.stage(), ResourceStage::Loading);

        res.mark_loaded();
        assert_eq!(res.stage(), ResourceStage::Idle);

        res.add_owner(OwnerToken::Application(1)).unwrap();
        assert_eq!(res.stage(), ResourceStage::Owned);

        res.remove_owner(OwnerToken::Application(1)).unwrap();
        assert_eq!(res.stage(), ResourceStage::Idle);

        res.mark_unloaded();
        assert_eq!(res.stage(), ResourceStage::Unloaded);

        // Dead handles stay dead.
        res.mark_loaded();
        assert_eq!(res.stage(), ResourceStage::Unloaded);
    }

    #[test]
    fn test_duplicate_owner_rejected() {
        let res = Resource::preloaded(ResourceKind::Script, "/a.js", ResourceFlags::default());
        res.add_owner(OwnerToken::Application(1)).unwrap();

        let err = res.add_owner(OwnerToken::Application(1)).unwrap_err();
        assert!(matches!(err, ResourceError::DuplicateOwner { .. }));
        assert_eq!(res.owner_count(), 1);
    }

    #[test]
    fn test_unique_rejects_second_owner() {
        let res = Resource::preloaded(ResourceKind::Module, "/m", ResourceFlags::UNIQUE);
        res.add_owner(OwnerToken::Application(1)).unwrap();

        let err = res.add_owner(OwnerToken::Application(2)).unwrap_err();
        assert_eq!(
            err,
            ResourceError::UniqueViolation {
                key: res.key().clone(),
                holder: OwnerToken::Application(1),
            }
        );
    }

    #[test]
    fn test_replace_owner_keeps_count() {
        let res = Resource::preloaded(ResourceKind::Script, "/a.js", ResourceFlags::default());
        res.add_owner(OwnerToken::Bootstrap(5)).unwrap();
        res.add_owner(OwnerToken::Application(2)).unwrap();

        res.replace_owner(OwnerToken::Bootstrap(5), OwnerToken::Application(9)).unwrap();

        assert_eq!(
            res.owners(),
            vec![OwnerToken::Application(9), OwnerToken::Application(2)]
        );
    }

    #[test]
    fn test_remove_missing_owner() {
        let res = Resource::preloaded(ResourceKind::Script, "/a.js", ResourceFlags::default());
        let err = res.remove_owner(OwnerToken::Window(4)).unwrap_err();
        assert!(matches!(err, ResourceError::NotOwned { .. }));
    }
}
