//! Retention tiers for cloned prefabs.
//!
//! ```text
//!   Tier        Owner      Registered in            Name tag     Pinned
//!   ─────────   ────────   ──────────────────────   ──────────   ──────
//!   None        caller     -                        -            no
//!   Temporary   registry   TempMap                  "(Temp)"     no
//!   Permanent   registry   PermanentSet + Map       "(Prefab)"   yes
//! ```

use crate::builder::RegistryConfig;

/// Which store, if any, a freshly materialized clone is registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Caller-owned copy; no registration.
    None,
    /// Registry-owned, may be torn down by the host at any time.
    Temporary,
    /// Registry-owned and pinned across context transitions.
    Permanent,
}

impl Tier {
    /// Name tag appended to clones of this tier.
    pub fn suffix(self, config: &RegistryConfig) -> Option<&str> {
        match self {
            Tier::None => None,
            Tier::Temporary => Some(config.temp_suffix.as_str()),
            Tier::Permanent => Some(config.permanent_suffix.as_str()),
        }
    }

    /// Returns `true` if clones of this tier are pinned in the host.
    #[inline]
    pub fn is_pinned(self) -> bool {
        matches!(self, Tier::Permanent)
    }
}
