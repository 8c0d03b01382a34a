//! Error types for the prefabkit library.
//!
//! ## Key Components
//!
//! - [`PrefabError`]: Returned by registry operations that violate a tier
//!   precondition (committing twice, fetching an uncommitted key) or that
//!   cannot derive a [`TypeKey`](crate::key::TypeKey) for the requested type.
//! - [`ConfigError`]: Returned when registry configuration is invalid
//!   (empty or clashing tier suffixes).
//! - [`InvariantError`]: Returned when the permanent-tier bookkeeping diverges
//!   (`check_invariants`).
//!
//! A missing template is never an error: copy and temp-tier operations model
//! it as `Ok(None)`.
//!
//! ## Example Usage
//!
//! ```
//! use prefabkit::prelude::*;
//!
//! struct Beacon;
//! impl Component for Beacon {}
//!
//! let registry = PrefabRegistry::new(MemoryHost::new());
//! let err = registry.get_cached_prefab::<Beacon>().unwrap_err();
//! assert!(matches!(err, PrefabError::NotCached { .. }));
//! ```

use thiserror::Error;

use crate::key::TypeKey;

/// Result alias used by registry operations.
pub type Result<T, E = PrefabError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// PrefabError
// ---------------------------------------------------------------------------

/// Errors raised synchronously by [`PrefabRegistry`](crate::registry::PrefabRegistry).
///
/// None of these are retried internally. Callers are expected to check
/// membership with `is_cached` before permanent-tier operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefabError {
    /// No live permanent-tier entry exists for the key.
    #[error("prefab `{key}` is not in the permanent cache")]
    NotCached { key: TypeKey },

    /// The key is already committed to the permanent tier.
    #[error("prefab `{key}` is already in the permanent cache")]
    AlreadyCached { key: TypeKey },

    /// No stable type identity could be produced for the requested type.
    #[error("cannot derive a type key from {type_name:?}")]
    InvalidKey { type_name: String },
}

impl PrefabError {
    /// Returns the key the error refers to, if one was derived.
    pub fn key(&self) -> Option<&TypeKey> {
        match self {
            PrefabError::NotCached { key } | PrefabError::AlreadyCached { key } => Some(key),
            PrefabError::InvalidKey { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal registry invariants are violated.
///
/// Produced by [`PrefabRegistry::check_invariants`](crate::registry::PrefabRegistry::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}


// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when registry configuration parameters are invalid.
///
/// Produced by [`RegistryConfig::validate`](crate::builder::RegistryConfig::validate)
/// and [`PrefabRegistryBuilder::try_build`](crate::builder::PrefabRegistryBuilder::try_build).
///
/// # Example
///
/// ```
/// use prefabkit::builder::PrefabRegistryBuilder;
/// use prefabkit::host::MemoryHost;
///
/// let err = PrefabRegistryBuilder::new(MemoryHost::new())
///     .temp_suffix("")
///     .try_build()
///     .unwrap_err();
/// assert!(err.to_string().contains("temp suffix"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
