pub use crate::builder::{PrefabRegistryBuilder, RegistryConfig};
pub use crate::error::{ConfigError, InvariantError, PrefabError};
pub use crate::host::{MemoryHost, ObjectId};
pub use crate::key::TypeKey;
#[cfg(feature = "metrics")]
pub use crate::metrics::{MetricsSnapshotProvider, RegistryMetricsSnapshot};
pub use crate::registry::PrefabRegistry;
pub use crate::tier::Tier;
pub use crate::traits::{Component, PrefabHost};
