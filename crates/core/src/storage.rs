//! Key-value storage for the persisted cart.
//!
//! The cart lives in a single string slot, the way a browser page keeps it
//! in local storage. [`CartStorage`] is the seam: the core ships an
//! in-memory store, front ends bring their own (the CLI uses files).

use std::collections::HashMap;

use thiserror::Error;

/// Slot the cart is stored under.
pub const CART_STORAGE_KEY: &str = "chaat_ca_cart_v1";

/// Errors a storage backend can report.
///
/// Cart loading and saving absorb these; they never reach the customer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or cannot be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing would exceed the backend's size limit.
    #[error("Storage quota of {limit} bytes exceeded")]
    QuotaExceeded {
        /// Maximum number of bytes the backend holds.
        limit: usize,
    },

    /// Underlying I/O failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A string-keyed store of string values.
pub trait CartStorage {
    /// Read the value stored under `key`, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage with optional size limit.
///
/// A disabled store fails every call, like a browser with storage turned
/// off in private mode.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStorage {
    /// Create an empty, unlimited store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once keys plus values exceed
    /// `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// Create a store that fails every read and write.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.slots
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    fn check_enabled(&self) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable("storage is disabled".to_string()));
        }
        Ok(())
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_enabled()?;
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        if let Some(limit) = self.quota {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { limit });
            }
        }
        self.slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl<S: CartStorage + ?Sized> CartStorage for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
