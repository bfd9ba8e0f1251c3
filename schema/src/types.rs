//! Property type identities and the dynamic type intern cache.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// The name a property is known by within its domain.
///
/// Static types are declared as constants with [`PropertyType::fixed`].
/// Families of numbered slots use [`PropertyType::dynamic`], which interns
/// one instance per `(prefix, index)` for the life of the process.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct PropertyType {
    name: &'static str,
}

type InternKey = (&'static str, u16);

static DYNAMIC_TYPES: Lazy<RwLock<HashMap<InternKey, PropertyType>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

impl PropertyType {
    /// Declares a static property type.
    #[must_use]
    pub const fn fixed(name: &'static str) -> Self {
        Self { name }
    }

    /// Returns the interned type named `"{prefix}-{index}"`.
    ///
    /// Repeated calls with the same pair return the same instance, so
    /// [`PropertyType::ptr_eq`] holds between them.
    #[must_use]
    pub fn dynamic(prefix: &'static str, index: u16) -> Self {
        let key = (prefix, index);
        if let Some(ty) = DYNAMIC_TYPES.read().get(&key) {
            return *ty;
        }

        let mut types = DYNAMIC_TYPES.write();
        *types.entry(key).or_insert_with(|| {
            let name: &'static str = Box::leak(format!("{prefix}-{index}").into_boxed_str());
            Self { name }
        })
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if both types share one name allocation.
    #[must_use]
    pub fn ptr_eq(a: Self, b: Self) -> bool {
        std::ptr::eq(a.name, b.name)
    }
}

impl PartialEq for PropertyType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for PropertyType {}

impl Hash for PropertyType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyType").field(&self.name).finish()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
