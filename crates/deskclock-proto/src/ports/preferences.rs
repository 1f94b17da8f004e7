use std::sync::Arc;

use masterror::Error;

/// Error type emitted by preference stores when persisting values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    /// The backing storage could not be read or written.
    #[error("failed to access preference storage: {context}")]
    Storage { context: Arc<str> },

    /// Stored preferences could not be decoded.
    #[error("failed to decode preferences: {context}")]
    Decode { context: Arc<str> },

    /// Preferences could not be encoded for storage.
    #[error("failed to encode preferences: {context}")]
    Encode { context: Arc<str> },
}

impl PreferenceError {
    pub fn storage(context: impl Into<String>) -> Self {
        Self::Storage {
            context: Arc::from(context.into()),
        }
    }

    pub fn decode(context: impl Into<String>) -> Self {
        Self::Decode {
            context: Arc::from(context.into()),
        }
    }

    pub fn encode(context: impl Into<String>) -> Self {
        Self::Encode {
            context: Arc::from(context.into()),
        }
    }
}

/// Key-value preference storage.
///
/// Writes and removals are visible to reads on the same store immediately;
/// they only reach the backing storage when
/// [`apply`](PreferenceStore::apply) is called.
pub trait PreferenceStore {
    fn get_int(&self, key: &str, default: i64) -> i64;

    fn put_int(&mut self, key: &str, value: i64);

    fn get_string(&self, key: &str) -> Option<String>;

    fn put_string(&mut self, key: &str, value: &str);

    fn remove(&mut self, key: &str);

    /// Every key currently visible to reads, sorted.
    fn keys(&self) -> Vec<String>;

    /// Persist pending writes and removals.
    fn apply(&mut self) -> Result<(), PreferenceError>;
}

#[cfg(test)]
mod tests {
    use super::PreferenceError;

    #[test]
    fn storage_error_carries_context() {
        let err = PreferenceError::storage("disk full");
        assert_eq!(err.to_string(), "failed to access preference storage: disk full");
    }
}
