// ABOUTME: Phantom-typed identifiers for runtime-assigned ids.
// ABOUTME: A container id can never be handed to an exec call and vice versa.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker types for phantom type parameters.
/// Using empty enums prevents instantiation and requires no trait bounds.
pub enum ContainerMarker {}
pub enum ExecMarker {}

/// A type-safe identifier that prevents accidental mixing of different ID types.
///
/// The daemon assigns both container ids and exec instance ids as opaque hex
/// strings; the marker keeps them from being mixed up.
#[must_use = "IDs reference daemon objects and should not be ignored"]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: String) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_inner(self) -> String {
        self.value
    }

    /// The first twelve characters, as `docker ps` prints them.
    pub fn short(&self) -> &str {
        let end = self
            .value
            .char_indices()
            .nth(12)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len());
        &self.value[..end]
    }
}

// T is only a marker, so these cannot be derived.

impl<T> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Id").field("value", &self.value).finish()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> std::fmt::Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(value))
    }
}

pub type ContainerId = Id<ContainerMarker>;
pub type ExecId = Id<ExecMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_truncates_long_ids() {
        let id = ContainerId::new("4f1c0e6b2a9d8e7f6a5b4c3d2e1f".to_string());
        assert_eq!(id.short(), "4f1c0e6b2a9d");
    }

    #[test]
    fn short_keeps_short_ids() {
        let id = ExecId::new("abc".to_string());
        assert_eq!(id.short(), "abc");
    }
}
