//! JSON records on top of a [`Storage`] backend.

use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use super::{Storage, StorageError};

/// Loads and decodes the value under `key`.
///
/// Absent, unreadable and corrupt values all come back as `None`; the latter
/// two are logged.
pub(crate) fn load<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(error) => {
            warn!(key, %error, "failed to read stored value, treating as empty");

            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(key, %error, "stored value is corrupt, treating as empty");

            None
        }
    }
}

/// Encodes `value` and writes it under `key`.
pub(crate) fn save<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let encoded = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;

    storage.write(key, &encoded)
}
