//! Type-keyed prefab registry with three retention tiers.
//!
//! ## Architecture
//!
//! ```text
//!   copy_prefab::<T>(parent) ────────────┐
//!                                        │ Tier::None
//!   get_temp_prefab::<T>() ──► TempMap? ─┤ Tier::Temporary   (miss or stale)
//!                              │ live    │
//!                              ▼         ▼
//!                            handle   materialize(key, tier, parent)
//!                                        │  host.find_instances(key)
//!   catch_prefab::<T>() ─────────────────┤  host.clone_instance(template, parent)
//!     (AlreadyCached if in PermanentSet) │  strip "(Clone)", append tier tag
//!                                        │  register + pin (Permanent)
//!                                        ▼
//!                        ┌──────────────────────────────┐
//!                        │ PermanentSet  PermanentMap   │◄── get_cached_prefab
//!                        │ TempMap                      │◄── uncache_prefab
//!                        └──────────────────────────────┘◄── uncache_all
//! ```
//!
//! ## Staleness
//!
//! The host may destroy temp-tier instances during its own teardown without
//! telling the registry. Entries are therefore re-validated with
//! [`PrefabHost::is_alive`] on every read; a dead temp entry is replaced by a
//! fresh clone, a dead permanent entry reads as [`PrefabError::NotCached`].
//! Permanent instances are pinned, so only an explicit `host.destroy` can make
//! them stale.
//!
//! ## Example Usage
//!
//! ```
//! use prefabkit::prelude::*;
//!
//! struct Beacon;
//! impl Component for Beacon {}
//!
//! let mut host = MemoryHost::new();
//! host.spawn_component::<Beacon>("Beacon").unwrap();
//! let mut registry = PrefabRegistry::new(host);
//!
//! let committed = registry.catch_prefab::<Beacon>().unwrap();
//! assert!(committed.is_some());
//!
//! let cached = registry.get_cached_prefab::<Beacon>().unwrap();
//! assert_eq!(registry.host().name(&cached).as_deref(), Some("Beacon(Prefab)"));
//!
//! assert!(matches!(
//!     registry.catch_prefab::<Beacon>(),
//!     Err(PrefabError::AlreadyCached { .. })
//! ));
//! registry.uncache_prefab::<Beacon>().unwrap();
//! assert!(registry.get_cached_prefab::<Beacon>().is_err());
//! ```
//!
//! ## Thread Safety
//!
//! Single-threaded by contract. Every call completes synchronously; there is
//! no internal locking.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::builder::{PrefabRegistryBuilder, RegistryConfig};
use crate::error::{InvariantError, PrefabError, Result};
use crate::key::TypeKey;
#[cfg(feature = "metrics")]
use crate::metrics::{
    MetricsSnapshotProvider, RegistryMetrics, RegistryMetricsReadRecorder,
    RegistryMetricsRecorder, RegistryMetricsSnapshot,
};
use crate::tier::Tier;
use crate::traits::{Component, PrefabHost};

/// Keyed store of cloned templates over a host environment.
#[derive(Debug)]
pub struct PrefabRegistry<H: PrefabHost> {
    host: H,
    config: RegistryConfig,
    permanent_keys: FxHashSet<TypeKey>,
    permanent: FxHashMap<TypeKey, H::Handle>,
    temp: FxHashMap<TypeKey, H::Handle>,
    #[cfg(feature = "metrics")]
    metrics: RegistryMetrics,
}

impl<H: PrefabHost> PrefabRegistry<H> {
    /// Creates an empty registry with default suffixes.
    pub fn new(host: H) -> Self {
        Self::with_config(host, RegistryConfig::default())
    }

    /// Creates an empty registry with `config`, unvalidated.
    pub fn with_config(host: H, config: RegistryConfig) -> Self {
        Self {
            host,
            config,
            permanent_keys: FxHashSet::default(),
            permanent: FxHashMap::default(),
            temp: FxHashMap::default(),
            #[cfg(feature = "metrics")]
            metrics: RegistryMetrics::default(),
        }
    }

    pub fn builder(host: H) -> PrefabRegistryBuilder<H> {
        PrefabRegistryBuilder::new(host)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to run a scene transition.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the registry without destroying cached instances.
    pub fn into_host(self) -> H {
        self.host
    }

    // -----------------------------------------------------------------------
    // Uncached copies
    // -----------------------------------------------------------------------

    /// Clones the template for `T` under `parent`, without registering it.
    ///
    /// Returns `Ok(None)` if the host holds no live instance of `T`.
    pub fn copy_prefab<T: Component>(
        &mut self,
        parent: Option<&H::Handle>,
    ) -> Result<Option<H::Handle>> {
        let key = T::type_key()?;
        #[cfg(feature = "metrics")]
        self.metrics.record_copy_call();

        let copy = self.materialize(&key, Tier::None, parent);
        #[cfg(feature = "metrics")]
        if copy.is_some() {
            self.metrics.record_copy_found();
        }
        Ok(copy)
    }

    // -----------------------------------------------------------------------
    // Temporary tier
    // -----------------------------------------------------------------------

    /// Returns the temp-tier instance for `T`, cloning one if needed.
    ///
    /// A cached entry is reused while the host keeps it alive; otherwise a
    /// fresh clone replaces it. `Ok(None)` means no template exists.
    pub fn get_temp_prefab<T: Component>(&mut self) -> Result<Option<H::Handle>> {
        let key = T::type_key()?;
        Ok(self.temp_prefab(&key))
    }

    fn temp_prefab(&mut self, key: &TypeKey) -> Option<H::Handle> {
        if let Some(handle) = self.temp.get(key) {
            if self.host.is_alive(handle) {
                tracing::trace!(key = %key, "temp prefab hit");
                #[cfg(feature = "metrics")]
                self.metrics.record_temp_hit();
                return Some(handle.clone());
            }
            tracing::trace!(key = %key, "temp prefab destroyed by host, replacing");
            #[cfg(feature = "metrics")]
            self.metrics.record_temp_stale();
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_temp_miss();
        self.materialize(key, Tier::Temporary, None)
    }

    /// Drops temp entries whose instance is no longer live.
    ///
    /// Never destroys anything; returns the number of entries removed.
    pub fn prune_temp(&mut self) -> usize {
        let before = self.temp.len();
        let host = &self.host;
        self.temp.retain(|_, handle| host.is_alive(handle));
        before - self.temp.len()
    }

    // -----------------------------------------------------------------------
    // Permanent tier
    // -----------------------------------------------------------------------

    /// Returns the permanent-tier instance for `T`.
    ///
    /// Fails with [`PrefabError::NotCached`] if `T` was never committed, was
    /// uncached, or its instance is no longer live. Never clones lazily.
    pub fn get_cached_prefab<T: Component>(&self) -> Result<H::Handle> {
        let key = T::type_key()?;
        match self.permanent.get(&key) {
            Some(handle) if self.host.is_alive(handle) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_cached_hit();
                Ok(handle.clone())
            },
            _ => {
                #[cfg(feature = "metrics")]
                self.metrics.record_cached_miss();
                Err(PrefabError::NotCached { key })
            },
        }
    }

    /// Commits a pinned clone of `T`'s template to the permanent tier.
    ///
    /// Fails with [`PrefabError::AlreadyCached`] if `T` is already committed.
    /// Returns `Ok(None)` when no template exists; nothing is registered in
    /// that case and a later call may try again.
    pub fn catch_prefab<T: Component>(&mut self) -> Result<Option<H::Handle>> {
        let key = T::type_key()?;
        #[cfg(feature = "metrics")]
        self.metrics.record_catch_call();

        if self.permanent_keys.contains(&key) {
            return Err(PrefabError::AlreadyCached { key });
        }

        let committed = self.materialize(&key, Tier::Permanent, None);
        match &committed {
            Some(_) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_catch_committed();
            },
            None => {
                tracing::warn!(key = %key, "no template to commit to the permanent cache");
                #[cfg(feature = "metrics")]
                self.metrics.record_catch_no_template();
            },
        }
        Ok(committed)
    }

    /// Removes `T` from the permanent tier and destroys its instance.
    ///
    /// Only presence is checked: an entry whose instance is already dead is
    /// still removed. Fails with [`PrefabError::NotCached`] if absent.
    pub fn uncache_prefab<T: Component>(&mut self) -> Result<()> {
        let key = T::type_key()?;
        self.uncache_key(&key)
    }

    fn uncache_key(&mut self, key: &TypeKey) -> Result<()> {
        let Some(handle) = self.permanent.remove(key) else {
            return Err(PrefabError::NotCached { key: key.clone() });
        };
        self.permanent_keys.remove(key);
        #[cfg(feature = "metrics")]
        self.metrics.record_uncache();

        let live = self.host.is_alive(&handle);
        if live {
            self.host.destroy(&handle);
            #[cfg(feature = "metrics")]
            self.metrics.record_destroyed_instance();
        }
        tracing::debug!(key = %key, destroyed = live, "prefab uncached");
        Ok(())
    }

    /// Destroys every permanent instance and empties the permanent tier.
    ///
    /// The temp tier is left untouched.
    pub fn uncache_all(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_uncache_all();

        let mut destroyed = 0usize;
        for (_, handle) in self.permanent.drain() {
            if self.host.is_alive(&handle) {
                self.host.destroy(&handle);
                destroyed += 1;
                #[cfg(feature = "metrics")]
                self.metrics.record_destroyed_instance();
            }
        }
        self.permanent_keys.clear();
        tracing::debug!(destroyed, "permanent cache cleared");
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Returns `true` if `T` is committed to the permanent tier.
    pub fn is_cached<T: Component>(&self) -> Result<bool> {
        Ok(self.is_cached_key(&T::type_key()?))
    }

    pub fn is_cached_key(&self, key: &TypeKey) -> bool {
        self.permanent_keys.contains(key)
    }

    /// Number of permanent-tier entries.
    pub fn cached_len(&self) -> usize {
        self.permanent.len()
    }

    /// Number of temp-tier entries, stale ones included.
    pub fn temp_len(&self) -> usize {
        self.temp.len()
    }

    /// Keys committed to the permanent tier, in no particular order.
    pub fn cached_keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.permanent_keys.iter()
    }

    /// Verifies that the permanent set and map hold the same keys.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        if self.permanent_keys.len() != self.permanent.len() {
            return Err(InvariantError::new(format!(
                "permanent set has {} keys but permanent map has {}",
                self.permanent_keys.len(),
                self.permanent.len()
            )));
        }
        if let Some(key) = self
            .permanent_keys
            .iter()
            .find(|key| !self.permanent.contains_key(*key))
        {
            return Err(InvariantError::new(format!(
                "key {key} is in the permanent set but not in the permanent map"
            )));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Materialize
    // -----------------------------------------------------------------------

    /// Finds a live template for `key`, clones it and registers the clone
    /// according to `tier`. `None` means no template exists.
    ///
    /// Instances the registry holds are used as templates only when nothing
    /// else of that type is live.
    fn materialize(
        &mut self,
        key: &TypeKey,
        tier: Tier,
        parent: Option<&H::Handle>,
    ) -> Option<H::Handle> {
        #[cfg(feature = "metrics")]
        self.metrics.record_materialize_call();

        let Some(template) = self.select_template(key) else {
            tracing::debug!(key = %key, ?tier, "no template instance");
            return None;
        };

        let clone = self.host.clone_instance(&template, parent)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_materialize_found();

        let base = self
            .host
            .name(&clone)
            .map(|name| self.base_name(&name))
            .unwrap_or_default();
        let name = match tier.suffix(&self.config) {
            Some(suffix) => format!("{base}{suffix}"),
            None => base,
        };
        self.host.set_name(&clone, name);
        if tier.is_pinned() {
            self.host.pin(&clone);
        }

        match tier {
            Tier::None => {},
            Tier::Temporary => {
                self.temp.insert(key.clone(), clone.clone());
            },
            Tier::Permanent => {
                self.permanent_keys.insert(key.clone());
                self.permanent.insert(key.clone(), clone.clone());
            },
        }
        tracing::debug!(key = %key, ?tier, "prefab materialized");
        Some(clone)
    }

    fn select_template(&self, key: &TypeKey) -> Option<H::Handle> {
        let candidates = self.host.find_instances(key);
        let owned = |handle: &H::Handle| {
            self.permanent
                .values()
                .chain(self.temp.values())
                .any(|held| held == handle)
        };
        candidates
            .iter()
            .find(|handle| self.host.is_alive(handle) && !owned(*handle))
            .or_else(|| candidates.iter().find(|handle| self.host.is_alive(handle)))
            .cloned()
    }

    /// Strips the host clone suffix and any tier tags from `name`.
    fn base_name(&self, name: &str) -> String {
        let mut base = self.host.strip_clone_suffix(name);
        let tags = [
            self.config.permanent_suffix.as_str(),
            self.config.temp_suffix.as_str(),
        ];
        loop {
            let Some(stripped) = tags
                .iter()
                .filter(|tag| !tag.is_empty())
                .find_map(|tag| base.strip_suffix(*tag))
            else {
                return base;
            };
            base = stripped.trim_end().to_string();
        }
    }
}

#[cfg(feature = "metrics")]
impl<H: PrefabHost> PrefabRegistry<H> {
    pub fn metrics_snapshot(&self) -> RegistryMetricsSnapshot {
        self.metrics
            .snapshot(self.permanent.len(), self.temp.len())
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

#[cfg(feature = "metrics")]
impl<H: PrefabHost> MetricsSnapshotProvider<RegistryMetricsSnapshot> for PrefabRegistry<H> {
    fn snapshot(&self) -> RegistryMetricsSnapshot {
        self.metrics_snapshot()
    }
}
