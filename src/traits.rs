//! # Host and Component Traits
//!
//! The registry never touches an engine directly. Everything it needs from the
//! host environment (scene search, instantiation, teardown, pinning, naming)
//! goes through [`PrefabHost`], and every type it can be asked about implements
//! [`Component`].
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────┐
//!   │           PrefabRegistry<H>              │
//!   │                                          │
//!   │  copy_prefab / get_temp_prefab           │
//!   │  catch_prefab / get_cached_prefab        │
//!   │  uncache_prefab / uncache_all            │
//!   └──────────────────┬───────────────────────┘
//!                      │ T::type_key()
//!                      ▼
//!   ┌──────────────────────────────────────────┐
//!   │              materialize                 │
//!   │  find ─► clone ─► rename ─► register     │
//!   └──────────────────┬───────────────────────┘
//!                      │
//!                      ▼
//!   ┌──────────────────────────────────────────┐
//!   │             PrefabHost                   │
//!   │                                          │
//!   │  find_instances(&TypeKey) → Vec<Handle>  │
//!   │  clone_instance(&Handle, parent)         │
//!   │  destroy(&Handle)                        │
//!   │  pin(&Handle)                            │
//!   │  is_alive(&Handle) → bool                │
//!   │  name / set_name / strip_clone_suffix    │
//!   └──────────────────────────────────────────┘
//! ```
//!
//! ## Liveness
//!
//! The host does not notify the registry when it destroys an object. Handles
//! must therefore be cheap to test with [`PrefabHost::is_alive`]; the registry
//! polls it on every temp-tier and permanent-tier read.

use std::fmt::Debug;

use crate::error::PrefabError;
use crate::key::TypeKey;

/// A type the registry can locate templates for.
///
/// The default key is the fully-qualified Rust type name. Override
/// [`Component::type_key`] when the host identifies types by a different
/// stable name.
///
/// ```
/// use prefabkit::error::PrefabError;
/// use prefabkit::key::TypeKey;
/// use prefabkit::traits::Component;
///
/// struct Beacon;
/// impl Component for Beacon {
///     fn type_key() -> Result<TypeKey, PrefabError> {
///         TypeKey::from_static("Game.Beacon")
///     }
/// }
///
/// assert_eq!(Beacon::type_key().unwrap().as_str(), "Game.Beacon");
/// ```
pub trait Component: 'static {
    /// Stable identity used as the cache key.
    fn type_key() -> Result<TypeKey, PrefabError> {
        TypeKey::of::<Self>()
    }
}

/// Services the host environment provides to the registry.
pub trait PrefabHost {
    /// Opaque reference to a host object.
    type Handle: Clone + Eq + Debug;

    /// Name fragment the host appends to fresh clones.
    const CLONE_SUFFIX: &'static str = "(Clone)";

    /// All instances whose type identity equals `key`, in any order.
    fn find_instances(&self, key: &TypeKey) -> Vec<Self::Handle>;

    /// Deep-copies `template` and its subtree, attaching the copy to `parent`.
    ///
    /// Returns `None` if `template` is no longer live, or if `parent` lies
    /// inside the template's own subtree.
    fn clone_instance(
        &mut self,
        template: &Self::Handle,
        parent: Option<&Self::Handle>,
    ) -> Option<Self::Handle>;

    /// Releases `handle` and its subtree.
    fn destroy(&mut self, handle: &Self::Handle);

    /// Exempts `handle` from scoped teardown (context transitions).
    fn pin(&mut self, handle: &Self::Handle);

    /// Returns `true` if `handle` still refers to a live object.
    fn is_alive(&self, handle: &Self::Handle) -> bool;

    /// Current name of `handle`, or `None` if it is not live.
    fn name(&self, handle: &Self::Handle) -> Option<String>;

    /// Renames `handle`. No-op if it is not live.
    fn set_name(&mut self, handle: &Self::Handle, name: String);

    /// Removes every occurrence of [`Self::CLONE_SUFFIX`] from `name`.
    fn strip_clone_suffix(&self, name: &str) -> String {
        name.replace(Self::CLONE_SUFFIX, "").trim_end().to_string()
    }
}
