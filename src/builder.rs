//! Registry configuration and builder.
//!
//! ## Example
//!
//! ```rust
//! use prefabkit::builder::PrefabRegistryBuilder;
//! use prefabkit::host::MemoryHost;
//!
//! let registry = PrefabRegistryBuilder::new(MemoryHost::new())
//!     .permanent_suffix(" [P]")
//!     .temp_suffix(" [T]")
//!     .try_build()
//!     .unwrap();
//! assert_eq!(registry.config().permanent_suffix, " [P]");
//! ```

use crate::error::ConfigError;
use crate::registry::PrefabRegistry;
use crate::traits::PrefabHost;

/// Default name tag for permanent-tier clones.
pub const DEFAULT_PERMANENT_SUFFIX: &str = "(Prefab)";

/// Default name tag for temp-tier clones.
pub const DEFAULT_TEMP_SUFFIX: &str = "(Temp)";

/// Naming configuration for cached clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Appended to permanent-tier clone names.
    pub permanent_suffix: String,
    /// Appended to temp-tier clone names.
    pub temp_suffix: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            permanent_suffix: DEFAULT_PERMANENT_SUFFIX.to_string(),
            temp_suffix: DEFAULT_TEMP_SUFFIX.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Checks that both suffixes are non-empty and distinguishable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.permanent_suffix.trim().is_empty() {
            return Err(ConfigError::new("permanent suffix must not be empty"));
        }
        if self.temp_suffix.trim().is_empty() {
            return Err(ConfigError::new("temp suffix must not be empty"));
        }
        if self.permanent_suffix == self.temp_suffix {
            return Err(ConfigError::new(format!(
                "permanent and temp suffix must differ (both {:?})",
                self.permanent_suffix
            )));
        }
        Ok(())
    }
}

/// Builder for [`PrefabRegistry`].
pub struct PrefabRegistryBuilder<H: PrefabHost> {
    host: H,
    config: RegistryConfig,
}

impl<H: PrefabHost> PrefabRegistryBuilder<H> {
    /// Starts a builder around `host` with default suffixes.
    pub fn new(host: H) -> Self {
        Self {
            host,
            config: RegistryConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the permanent-tier name tag.
    pub fn permanent_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.permanent_suffix = suffix.into();
        self
    }

    /// Sets the temp-tier name tag.
    pub fn temp_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.temp_suffix = suffix.into();
        self
    }

    /// Builds the registry without validating the configuration.
    pub fn build(self) -> PrefabRegistry<H> {
        PrefabRegistry::with_config(self.host, self.config)
    }

    /// Validates the configuration, then builds the registry.
    pub fn try_build(self) -> Result<PrefabRegistry<H>, ConfigError> {
        self.config.validate()?;
        Ok(self.build())
    }
}
