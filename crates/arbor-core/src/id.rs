#![forbid(unsafe_code)]

//! Opaque item identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Identifier of a tree item.
///
/// Ids are unique within one tree and stable across re-renders. Cloning is a
/// reference-count bump, so selection values and range lookups hold ids by
/// value instead of borrowing from the tree.
///
/// ```
/// use arbor_core::id::ItemId;
///
/// let id = ItemId::from("src/main.rs");
/// assert_eq!(id.as_str(), "src/main.rs");
/// assert_eq!(id, ItemId::new("src/main.rs"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Arc<str>);

impl ItemId {
    /// Create an id from any string-like value.
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(Arc::from(id))
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<&ItemId> for ItemId {
    fn from(id: &ItemId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

#[cfg(feature = "state-persistence")]
impl serde::Serialize for ItemId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "state-persistence")]
impl<'de> serde::Deserialize<'de> for ItemId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// Collect ids from string literals, mostly for tests and examples.
///
/// ```
/// use arbor_core::id::{ItemId, ids};
///
/// assert_eq!(ids(["a", "b"]), vec![ItemId::from("a"), ItemId::from("b")]);
/// ```
pub fn ids<I, S>(items: I) -> Vec<ItemId>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items.into_iter().map(ItemId::new).collect()
}
