//! Type identity used as the registry's cache key.
//!
//! A [`TypeKey`] is derived from the requested component type, never typed in
//! by callers, so two call sites asking for the same type always land on the
//! same cache entry.
//!
//! ## Example Usage
//!
//! ```
//! use prefabkit::key::TypeKey;
//!
//! struct Beacon;
//!
//! let a = TypeKey::of::<Beacon>().unwrap();
//! let b = TypeKey::of::<Beacon>().unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.short_name(), "Beacon");
//! ```

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;

use crate::error::PrefabError;

/// Stable, non-empty identifier for a component type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(Cow<'static, str>);

impl TypeKey {
    /// Derives the key for `T` from its fully-qualified type name.
    pub fn of<T: ?Sized + 'static>() -> Result<Self, PrefabError> {
        Self::from_static(type_name::<T>())
    }

    /// Builds a key from a static type name without allocating.
    pub fn from_static(name: &'static str) -> Result<Self, PrefabError> {
        validate(name)?;
        Ok(Self(Cow::Borrowed(name)))
    }

    /// Builds a key from a host-supplied stable name.
    pub fn new(name: impl Into<String>) -> Result<Self, PrefabError> {
        let name = name.into();
        validate(&name)?;
        Ok(Self(Cow::Owned(name)))
    }

    /// Returns the full identifier.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last path segment, ignoring generic arguments.
    ///
    /// `game::units::Beacon` yields `Beacon`; `Vec<game::Beacon>` yields `Vec`.
    pub fn short_name(&self) -> &str {
        let base = match self.0.find('<') {
            Some(idx) => &self.0[..idx],
            None => &self.0,
        };
        base.rsplit("::").next().unwrap_or(base)
    }
}

fn validate(name: &str) -> Result<(), PrefabError> {
    if name.trim().is_empty() {
        return Err(PrefabError::InvalidKey {
            type_name: name.to_string(),
        });
    }
    Ok(())
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TypeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Beacon;
    struct Turret;

    mod nested {
        pub struct Beacon;
    }

    #[test]
    fn same_type_yields_equal_keys() {
        assert_eq!(
            TypeKey::of::<Beacon>().unwrap(),
            TypeKey::of::<Beacon>().unwrap()
        );
    }

    #[test]
    fn distinct_types_yield_distinct_keys() {
        assert_ne!(
            TypeKey::of::<Beacon>().unwrap(),
            TypeKey::of::<Turret>().unwrap()
        );
    }

    #[test]
    fn same_short_name_in_other_module_is_distinct() {
        let outer = TypeKey::of::<Beacon>().unwrap();
        let inner = TypeKey::of::<nested::Beacon>().unwrap();
        assert_ne!(outer, inner);
        assert_eq!(outer.short_name(), inner.short_name());
    }

    #[test]
    fn owned_and_static_keys_compare_equal() {
        let owned = TypeKey::new("game::Beacon").unwrap();
        let borrowed = TypeKey::from_static("game::Beacon").unwrap();
        assert_eq!(owned, borrowed);
    }

    #[test]
    fn empty_name_is_invalid() {
        assert_eq!(
            TypeKey::new(""),
            Err(PrefabError::InvalidKey {
                type_name: String::new()
            })
        );
        assert!(TypeKey::from_static("   ").is_err());
    }

    #[test]
    fn short_name_strips_path_and_generics() {
        let key = TypeKey::new("alloc::vec::Vec<game::Beacon>").unwrap();
        assert_eq!(key.short_name(), "Vec");
        let key = TypeKey::new("Beacon").unwrap();
        assert_eq!(key.short_name(), "Beacon");
    }

    #[test]
    fn display_shows_full_name() {
        let key = TypeKey::new("game::Beacon").unwrap();
        assert_eq!(key.to_string(), "game::Beacon");
        assert_eq!(key.as_str(), "game::Beacon");
    }
}
