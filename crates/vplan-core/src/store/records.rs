//! Typed view over the raw credential store.

use super::{keys, read, read_flag, CredentialStore};

/// Everything the login settings screen persists.
///
/// `schoolid` is always the leading digit prefix of `schoolid_raw`; the raw
/// value is kept so the settings screen can re-display what the user typed.
/// `password` is only persisted while autologin is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialRecord {
    pub server_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub schoolid_raw: Option<String>,
    pub schoolid: Option<String>,
    pub autologin: bool,
    pub session_id: Option<String>,
}

impl CredentialRecord {
    /// Load the current record. Absent and empty fields read as `None`;
    /// a failing store degrades to an empty record.
    pub async fn load(store: &dyn CredentialStore) -> Self {
        Self {
            server_url: nonempty(read(store, keys::SERVER_URL).await),
            username: nonempty(read(store, keys::USERNAME).await),
            password: nonempty(read(store, keys::PASSWORD).await),
            schoolid_raw: nonempty(read(store, keys::SCHOOL_ID_RAW).await),
            schoolid: nonempty(read(store, keys::SCHOOL_ID).await),
            autologin: read_flag(store, keys::AUTOLOGIN).await,
            session_id: nonempty(read(store, keys::SESSION_ID).await),
        }
    }
}

fn nonempty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{write, write_flag, MemoryStore};

    #[tokio::test]
    async fn load_reads_all_fields() {
        let store = MemoryStore::new();
        write(&store, keys::SERVER_URL, "https://x.test").await;
        write(&store, keys::USERNAME, "max.mustermann").await;
        write(&store, keys::PASSWORD, "geheim").await;
        write(&store, keys::SCHOOL_ID_RAW, "5182 - Testschule - Kassel").await;
        write(&store, keys::SCHOOL_ID, "5182").await;
        write_flag(&store, keys::AUTOLOGIN, true).await;
        write(&store, keys::SESSION_ID, "abc").await;

        let record = CredentialRecord::load(&store).await;
        assert_eq!(record.server_url.as_deref(), Some("https://x.test"));
        assert_eq!(record.username.as_deref(), Some("max.mustermann"));
        assert_eq!(record.schoolid.as_deref(), Some("5182"));
        assert!(record.autologin);
        assert_eq!(record.session_id.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn empty_fields_load_as_absent() {
        let store = MemoryStore::new();
        write(&store, keys::PASSWORD, "").await;

        let record = CredentialRecord::load(&store).await;
        assert_eq!(record.password, None);
        assert!(!record.autologin);
    }
}
