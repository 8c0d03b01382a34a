//! prefabkit: a type-keyed prefab registry with uncached, temporary and
//! permanent retention tiers.
//!
//! The registry locates a live template instance of a component type through
//! a [`PrefabHost`](traits::PrefabHost), clones it and optionally keeps the
//! clone for reuse. See [`registry`] for the tier rules and [`traits`] for the
//! host seam.

pub mod builder;
pub mod error;
pub mod host;
pub mod key;
pub mod registry;
pub mod tier;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
