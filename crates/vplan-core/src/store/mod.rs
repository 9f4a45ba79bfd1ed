//! Persisted credential and filter storage.
//!
//! The store is an opaque encrypted key-value collaborator: string keys,
//! string values, asynchronous access. Read failures degrade to "value
//! absent" and write failures are logged and swallowed, so a broken backend
//! leaves the app in the "not logged in / no filter" state instead of
//! crashing it.

mod records;

pub use records::CredentialRecord;

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::StorageError;

/// Names of every persisted field.
pub mod keys {
    pub const SERVER_URL: &str = "serverURL";
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const SCHOOL_ID_RAW: &str = "schoolid_raw";
    pub const SCHOOL_ID: &str = "schoolid";
    pub const AUTOLOGIN: &str = "autologin";
    pub const SESSION_ID: &str = "sid";
    pub const GRADE_LEVEL: &str = "klassenstufe";
    pub const CLASS_LETTER: &str = "klassenbuchstabe";
    pub const TEACHER_FILTER: &str = "lehrerfilter";

    /// Every key the app ever writes. `clear()` walks this list because the
    /// OS keyring cannot enumerate its entries.
    pub const ALL: &[&str] = &[
        SERVER_URL,
        USERNAME,
        PASSWORD,
        SCHOOL_ID_RAW,
        SCHOOL_ID,
        AUTOLOGIN,
        SESSION_ID,
        GRADE_LEVEL,
        CLASS_LETTER,
        TEACHER_FILTER,
    ];
}

/// Opaque encrypted key-value store holding credential and filter fields.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Wipe every persisted field.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Read a value, treating storage failure as "absent".
pub async fn read(store: &dyn CredentialStore, key: &str) -> Option<String> {
    match store.get(key).await {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, %err, "credential store read failed, treating as absent");
            None
        }
    }
}

/// Read a value, treating storage failure and the empty string as "absent".
pub async fn read_nonempty(store: &dyn CredentialStore, key: &str) -> Option<String> {
    read(store, key).await.filter(|v| !v.is_empty())
}

/// Read a boolean flag. Absent, unparseable or failed reads are `false`.
pub async fn read_flag(store: &dyn CredentialStore, key: &str) -> bool {
    read(store, key)
        .await
        .and_then(|v| serde_json::from_str(&v).ok())
        .unwrap_or(false)
}

/// Write a value, logging and swallowing storage failure.
pub async fn write(store: &dyn CredentialStore, key: &str, value: &str) {
    if let Err(err) = store.set(key, value).await {
        tracing::warn!(key, %err, "credential store write failed");
    }
}

/// Write a boolean flag as a serialized boolean, never as string emptiness.
pub async fn write_flag(store: &dyn CredentialStore, key: &str, value: bool) {
    write(store, key, if value { "true" } else { "false" }).await;
}

/// OS-keyring-backed store.
///
/// The keyring API is synchronous; calls are pushed onto the blocking pool
/// so the cooperative core never stalls on a platform secret-service
/// round-trip.
pub struct KeyringStore {
    service: &'static str,
}

const SERVICE: &str = "vplan";

impl KeyringStore {
    pub fn new() -> Self {
        Self { service: SERVICE }
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

fn backend_err(err: impl std::fmt::Display) -> StorageError {
    StorageError::Backend(err.to_string())
}

#[async_trait]
impl CredentialStore for KeyringStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let (service, key) = (self.service, key.to_string());
        tokio::task::spawn_blocking(move || {
            let entry = keyring::Entry::new(service, &key).map_err(backend_err)?;
            match entry.get_password() {
                Ok(value) => Ok(Some(value)),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(e) => Err(backend_err(e)),
            }
        })
        .await
        .map_err(backend_err)?
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let (service, key, value) = (self.service, key.to_string(), value.to_string());
        tokio::task::spawn_blocking(move || {
            let entry = keyring::Entry::new(service, &key).map_err(backend_err)?;
            entry.set_password(&value).map_err(backend_err)
        })
        .await
        .map_err(backend_err)?
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let (service, key) = (self.service, key.to_string());
        tokio::task::spawn_blocking(move || delete_entry(service, &key))
            .await
            .map_err(backend_err)?
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let service = self.service;
        tokio::task::spawn_blocking(move || {
            for key in keys::ALL {
                delete_entry(service, key)?;
            }
            Ok(())
        })
        .await
        .map_err(backend_err)?
    }
}

fn delete_entry(service: &str, key: &str) -> Result<(), StorageError> {
    let entry = keyring::Entry::new(service, key).map_err(backend_err)?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(backend_err(e)),
    }
}

/// In-process store for tests and embedders without an OS keyring.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self
            .values
            .read()
            .map_err(|_| StorageError::Backend("store lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StorageError::Backend("store lock poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StorageError::Backend("store lock poisoned".into()))?;
        values.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StorageError::Backend("store lock poisoned".into()))?;
        values.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        store.set(keys::USERNAME, "max").await.unwrap();
        assert_eq!(
            read(&store, keys::USERNAME).await.as_deref(),
            Some("max")
        );

        store.remove(keys::USERNAME).await.unwrap();
        assert_eq!(read(&store, keys::USERNAME).await, None);
    }

    #[tokio::test]
    async fn clear_wipes_all_fields() {
        let store = MemoryStore::new();
        for key in keys::ALL {
            store.set(key, "value").await.unwrap();
        }
        store.clear().await.unwrap();
        for key in keys::ALL {
            assert_eq!(read(&store, key).await, None, "{key} survived clear");
        }
    }

    #[tokio::test]
    async fn read_nonempty_treats_empty_as_absent() {
        let store = MemoryStore::new();
        store.set(keys::PASSWORD, "").await.unwrap();
        assert_eq!(read_nonempty(&store, keys::PASSWORD).await, None);
    }

    #[tokio::test]
    async fn flags_are_real_booleans() {
        let store = MemoryStore::new();
        assert!(!read_flag(&store, keys::AUTOLOGIN).await);

        write_flag(&store, keys::AUTOLOGIN, true).await;
        assert_eq!(
            read(&store, keys::AUTOLOGIN).await.as_deref(),
            Some("true")
        );
        assert!(read_flag(&store, keys::AUTOLOGIN).await);

        write_flag(&store, keys::AUTOLOGIN, false).await;
        assert!(!read_flag(&store, keys::AUTOLOGIN).await);
    }

    #[tokio::test]
    async fn failed_reads_degrade_to_absent() {
        struct BrokenStore;

        #[async_trait]
        impl CredentialStore for BrokenStore {
            async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Err(StorageError::Backend("unavailable".into()))
            }
            async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::Backend("unavailable".into()))
            }
            async fn remove(&self, _key: &str) -> Result<(), StorageError> {
                Err(StorageError::Backend("unavailable".into()))
            }
            async fn clear(&self) -> Result<(), StorageError> {
                Err(StorageError::Backend("unavailable".into()))
            }
        }

        let store = BrokenStore;
        assert_eq!(read(&store, keys::SESSION_ID).await, None);
        assert!(!read_flag(&store, keys::AUTOLOGIN).await);
        // Writes must not propagate the failure either.
        write(&store, keys::USERNAME, "max").await;
    }
}
