//! # Banner registry - live, named banners reachable for selection.
//!
//! ## Architecture
//! ```text
//! Promotions::create ──► Registry::insert(banner)      (fails on duplicate name)
//! TransitionActor    ──► Registry::evict(&banner)      (Active → Expired only)
//! Promotions::choose ──► Registry::snapshot()          (read-only scan)
//! ```
//!
//! ## Rules
//! - One entry per name; a name is free again once its banner is evicted
//! - `insert` checks and inserts under one write lock (no partial registration)
//! - `evict` removes only the exact banner object it is given (idempotent)
//! - Locks are never held across `.await`

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::banners::BannerRef;
use crate::error::BannerError;

/// Registry of non-expired banners, keyed by name.
#[derive(Default)]
pub struct Registry {
    banners: RwLock<HashMap<String, BannerRef>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Adds `banner` under its name.
    ///
    /// Returns [`BannerError::DuplicateName`] and leaves the registry unchanged
    /// if the name is taken.
    pub fn insert(&self, banner: BannerRef) -> Result<(), BannerError> {
        let mut banners = self.banners.write();
        match banners.entry(banner.name().to_string()) {
            Entry::Occupied(e) => Err(BannerError::DuplicateName {
                name: e.key().clone(),
            }),
            Entry::Vacant(e) => {
                e.insert(banner);
                Ok(())
            }
        }
    }

    /// Removes `banner` if it is still the entry registered under its name.
    ///
    /// Returns `true` if an entry was removed.
    pub fn evict(&self, banner: &BannerRef) -> bool {
        let mut banners = self.banners.write();
        match banners.get(banner.name()) {
            Some(current) if Arc::ptr_eq(current, banner) => {
                banners.remove(banner.name());
                true
            }
            _ => false,
        }
    }

    /// Returns true if a live banner holds `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.banners.read().contains_key(name)
    }

    /// Returns the live banner registered under `name`.
    pub fn get(&self, name: &str) -> Option<BannerRef> {
        self.banners.read().get(name).cloned()
    }

    /// Returns a point-in-time copy of all live banners for scanning.
    pub fn snapshot(&self) -> Vec<BannerRef> {
        self.banners.read().values().cloned().collect()
    }

    /// Returns sorted list of live banner names.
    pub fn list(&self) -> Vec<String> {
        let banners = self.banners.read();
        let mut names: Vec<String> = banners.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Number of live banners.
    pub fn len(&self) -> usize {
        self.banners.read().len()
    }

    /// Returns true if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.banners.read().is_empty()
    }
}
