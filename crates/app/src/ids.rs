//! Prefixed local identifiers.
//!
//! Entities created on this side of the sync boundary carry identifiers made
//! of a reserved prefix and a v7 UUID, e.g. `local_0192…` or `custom_0192…`.
//! The prefix is what tells a staging identifier apart from one issued by the
//! remote API.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use thiserror::Error;
use uuid::Uuid;

/// Entity kinds that own a reserved identifier prefix.
pub trait IdPrefix {
    /// Prefix including the trailing separator.
    const PREFIX: &'static str;
}

/// Identifier that could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("identifier {value:?} does not start with {prefix:?}")]
pub struct InvalidLocalId {
    value: String,
    prefix: &'static str,
}

/// A locally generated identifier for entities of kind `T`.
pub struct LocalId<T>(String, PhantomData<T>);

impl<T: IdPrefix> LocalId<T> {
    /// Generates a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{}{}", T::PREFIX, Uuid::now_v7().simple()), PhantomData)
    }

    /// Returns whether `value` carries this kind's reserved prefix.
    #[must_use]
    pub fn is_staged(value: &str) -> bool {
        value.len() > T::PREFIX.len() && value.starts_with(T::PREFIX)
    }
}

impl<T> LocalId<T> {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<T: IdPrefix> FromStr for LocalId<T> {
    type Err = InvalidLocalId;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if Self::is_staged(value) {
            Ok(Self(value.to_string(), PhantomData))
        } else {
            Err(InvalidLocalId {
                value: value.to_string(),
                prefix: T::PREFIX,
            })
        }
    }
}

impl<T> Clone for LocalId<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T> Debug for LocalId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for LocalId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for LocalId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for LocalId<T> {}

impl<T> Hash for LocalId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for LocalId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for LocalId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Serialize for LocalId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de, T: IdPrefix> Deserialize<'de> for LocalId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;

        value.parse().map_err(D::Error::custom)
    }
}
