//! Custom package draft errors.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum DraftsError {
    #[error("a custom package needs at least one dish")]
    NoDishes,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_message_names_the_cause() {
        let error = DraftsError::from(StorageError::Unavailable("disk full".to_string()));

        assert_eq!(
            error.to_string(),
            "storage error: storage backend unavailable: disk full"
        );
    }
}
