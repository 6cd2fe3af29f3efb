//! Resource registry: load dedup and owner bookkeeping

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tracing::{debug, info, warn};
use crate::error::{ResourceError, ResourceResult};
use crate::loader::AssetLoader;
use crate::owner::OwnerToken;
use crate::resource::{Resource, ResourceFlags, ResourceKey, ResourceKind};

/// How many times a fetch restarts when its entry is torn down underneath it
const MAX_FETCH_ATTEMPTS: usize = 3;

/// Keyed registry of shared resources.
///
/// All methods take `&self` so that several owners can have fetches in
/// flight at once. Interior borrows are always released before an await
/// point and before the loader is called back.
pub struct ResourceManager {
    loader: Rc<dyn AssetLoader>,
    entries: RefCell<HashMap<ResourceKey, Rc<Resource>>>,
    /// Owners whose in-flight fetches must not complete
    severed: RefCell<HashSet<OwnerToken>>,
    /// Bootstrap tokens and the owner they were rebound to
    rebound: RefCell<HashMap<OwnerToken, OwnerToken>>,
    /// Fetches in flight per requesting token
    in_flight: RefCell<HashMap<OwnerToken, usize>>,
}

/// Counts one fetch in flight for a token until dropped
struct FetchGuard<'a> {
    manager: &'a ResourceManager,
    owner: OwnerToken,
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        let mut in_flight = self.manager.in_flight.borrow_mut();
        if let Some(count) = in_flight.get_mut(&self.owner) {
            *count -= 1;
            if *count == 0 {
                in_flight.remove(&self.owner);
            }
        }
        drop(in_flight);
        self.manager.prune();
    }
}

impl ResourceManager {
    /// Create a registry backed by the given loader
    pub fn new(loader: Rc<dyn AssetLoader>) -> Self {
        Self {
            loader,
            entries: RefCell::new(HashMap::new()),
            severed: RefCell::new(HashSet::new()),
            rebound: RefCell::new(HashMap::new()),
            in_flight: RefCell::new(HashMap::new()),
        }
    }

    /// Fetch a script for `owner`
    pub async fn fetch_script(&self, url: &str, owner: OwnerToken) -> ResourceResult<Rc<Resource>> {
        self.request(ResourceKind::Script, url, owner, ResourceFlags::default()).await
    }

    /// Fetch a stylesheet for `owner`
    pub async fn fetch_style(&self, url: &str, owner: OwnerToken) -> ResourceResult<Rc<Resource>> {
        self.request(ResourceKind::Style, url, owner, ResourceFlags::default()).await
    }

    /// Fetch a sub-module for `owner`
    pub async fn fetch_module(&self, url: &str, owner: OwnerToken) -> ResourceResult<Rc<Resource>> {
        self.request(ResourceKind::Module, url, owner, ResourceFlags::default()).await
    }

    /// Fetch an asset and register `owner` on it.
    ///
    /// Concurrent requests for the same key share a single load. `flags` only
    /// apply when this request creates the entry.
    pub async fn request(
        &self,
        kind: ResourceKind,
        url: &str,
        owner: OwnerToken,
        flags: ResourceFlags,
    ) -> ResourceResult<Rc<Resource>> {
        let key = ResourceKey::new(kind, url);
        let _fetch = self.track(owner);

        for _ in 0..MAX_FETCH_ATTEMPTS {
            let resource = self.entry(kind, url, flags);

            let outcome = {
                let _waiting = resource.begin_wait();
                resource
                    .load
                    .get_or_init(|| self.start_load(&resource))
                    .await
                    .clone()
            };

            if let Err(err) = outcome {
                self.discard(&resource);
                return Err(err);
            }
            resource.mark_loaded();

            // Other code ran while we were suspended; re-validate.
            if resource.is_unloaded() {
                debug!(%key, "entry unloaded during fetch, retrying");
                continue;
            }

            let owner = self.resolve_owner(owner);
            if self.severed.borrow().contains(&owner) {
                debug!(%key, %owner, "fetch abandoned");
                // Fetches still waiting on this load will pick it up.
                if resource.owner_count() == 0
                    && resource.waiters() == 0
                    && resource.unloads_when_idle()
                {
                    self.unload(&resource);
                }
                return Err(ResourceError::Abandoned { key, owner });
            }

            resource.add_owner(owner)?;
            debug!(%key, %owner, owners = resource.owner_count(), "resource acquired");
            return Ok(resource);
        }

        Err(ResourceError::Unloaded(key))
    }

    /// Look up the live entry for an asset, creating a pending one if needed.
    ///
    /// The entry is inserted before any await so concurrent callers find it.
    fn entry(&self, kind: ResourceKind, url: &str, flags: ResourceFlags) -> Rc<Resource> {
        let key = ResourceKey::new(kind, url);
        let mut entries = self.entries.borrow_mut();

        if let Some(existing) = entries.get(&key) {
            if !existing.is_unloaded() {
                return existing.clone();
            }
            debug!(%key, "discarding unloaded entry");
        }

        let resource = Rc::new(Resource::pending(kind, url, flags));
        entries.insert(key, resource.clone());
        resource
    }

    /// Build the single load future for a pending entry
    fn start_load(&self, resource: &Resource) -> impl std::future::Future<Output = ResourceResult<()>> {
        let key = resource.key().clone();
        info!(%key, "loading resource");
        let load = self.loader.load(resource.kind(), resource.url());
        async move {
            load.await.map_err(|reason| {
                warn!(%key, %reason, "resource load failed");
                ResourceError::Fetch { key, reason }
            })
        }
    }

    /// Drop a failed entry so that a retry starts from scratch
    fn discard(&self, resource: &Rc<Resource>) {
        let mut entries = self.entries.borrow_mut();
        if entries
            .get(resource.key())
            .is_some_and(|current| Rc::ptr_eq(current, resource))
        {
            entries.remove(resource.key());
        }
        resource.mark_unloaded();
    }

    fn resolve_owner(&self, owner: OwnerToken) -> OwnerToken {
        self.rebound.borrow().get(&owner).copied().unwrap_or(owner)
    }

    fn track(&self, owner: OwnerToken) -> FetchGuard<'_> {
        *self.in_flight.borrow_mut().entry(owner).or_insert(0) += 1;
        FetchGuard {
            manager: self,
            owner,
        }
    }

    /// Forget rebinds and severed owners no fetch in flight can observe
    fn prune(&self) {
        let in_flight = self.in_flight.borrow();
        let mut rebound = self.rebound.borrow_mut();
        rebound.retain(|from, _| in_flight.contains_key(from));

        let live: HashSet<OwnerToken> = in_flight
            .keys()
            .map(|token| rebound.get(token).copied().unwrap_or(*token))
            .collect();
        self.severed.borrow_mut().retain(|owner| live.contains(owner));
    }

    /// Register an asset the environment already loaded (typically at boot)
    pub fn add(&self, kind: ResourceKind, url: &str, flags: ResourceFlags) -> Rc<Resource> {
        let key = ResourceKey::new(kind, url);
        let mut entries = self.entries.borrow_mut();

        if let Some(existing) = entries.get(&key) {
            if !existing.is_unloaded() {
                return existing.clone();
            }
        }

        debug!(%key, permanent = flags.permanent, "registering preloaded resource");
        let resource = Rc::new(Resource::preloaded(kind, url, flags));
        entries.insert(key, resource.clone());
        resource
    }

    /// Remove an entry regardless of its owners, unloading it if loaded
    pub fn remove(&self, key: &ResourceKey) -> Option<Rc<Resource>> {
        let resource = self.entries.borrow_mut().remove(key)?;
        self.teardown(&resource);
        Some(resource)
    }

    /// Get the live entry for a key
    pub fn get(&self, key: &ResourceKey) -> Option<Rc<Resource>> {
        self.entries
            .borrow()
            .get(key)
            .filter(|r| !r.is_unloaded())
            .cloned()
    }

    /// Drop `owner` from a resource.
    ///
    /// Returns `true` if this release unloaded the resource.
    pub fn release(&self, key: &ResourceKey, owner: OwnerToken) -> ResourceResult<bool> {
        let resource = self
            .get(key)
            .ok_or_else(|| ResourceError::NotFound(key.clone()))?;

        let remaining = resource.remove_owner(owner)?;
        debug!(%key, %owner, remaining, "resource released");

        if remaining == 0 && resource.unloads_when_idle() {
            self.unload(&resource);
            return Ok(true);
        }
        Ok(false)
    }

    /// Release every resource held by `owner`, returning how many were released
    pub fn release_all(&self, owner: OwnerToken) -> usize {
        let held: Vec<ResourceKey> = self
            .entries
            .borrow()
            .values()
            .filter(|r| r.is_owned_by(owner))
            .map(|r| r.key().clone())
            .collect();

        let mut released = 0;
        for key in held {
            match self.release(&key, owner) {
                Ok(_) => released += 1,
                Err(err) => warn!(%key, %owner, %err, "release skipped"),
            }
        }
        released
    }

    /// Release everything `owner` holds and abandon its in-flight fetches
    pub fn sever(&self, owner: OwnerToken) -> usize {
        self.severed.borrow_mut().insert(owner);
        self.prune();
        self.release_all(owner)
    }

    /// Replace a bootstrap token with the real owner on every resource it
    /// holds. Fetches still in flight for `from` register `to` instead.
    pub fn rebind(&self, from: OwnerToken, to: OwnerToken) -> ResourceResult<usize> {
        self.rebound.borrow_mut().insert(from, to);
        self.prune();

        let held: Vec<Rc<Resource>> = self
            .entries
            .borrow()
            .values()
            .filter(|r| r.is_owned_by(from))
            .cloned()
            .collect();

        for resource in &held {
            resource.replace_owner(from, to)?;
        }
        debug!(%from, %to, count = held.len(), "owner rebound");
        Ok(held.len())
    }

    /// Unload idle entries that are not permanent and forget dead ones.
    ///
    /// Returns the number of entries removed.
    pub fn clean(&self) -> usize {
        let stale: Vec<Rc<Resource>> = self
            .entries
            .borrow()
            .values()
            .filter(|r| {
                r.is_unloaded()
                    || (r.is_loaded()
                        && r.owner_count() == 0
                        && r.waiters() == 0
                        && r.unloads_when_idle())
            })
            .cloned()
            .collect();

        for resource in &stale {
            if resource.is_unloaded() {
                self.entries.borrow_mut().remove(resource.key());
            } else {
                self.unload(resource);
            }
        }
        stale.len()
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Keys of every registered entry, sorted
    pub fn keys(&self) -> Vec<ResourceKey> {
        let mut keys: Vec<ResourceKey> = self.entries.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Take a resource out of the registry, then let the loader tear it down
    fn unload(&self, resource: &Rc<Resource>) {
        {
            let mut entries = self.entries.borrow_mut();
            if entries
                .get(resource.key())
                .is_some_and(|current| Rc::ptr_eq(current, resource))
            {
                entries.remove(resource.key());
            }
        }
        self.teardown(resource);
    }

    fn teardown(&self, resource: &Resource) {
        let was_loaded = resource.is_loaded();
        resource.mark_unloaded();
        if was_loaded {
            info!(key = %resource.key(), "unloading resource");
            self.loader.unload(resource.kind(), resource.url());
        }
    }
}

impl std::fmt::Debug for ResourceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceManager")
            .field("entries", &self.keys())
            .finish_non_exhaustive()
    }
}
