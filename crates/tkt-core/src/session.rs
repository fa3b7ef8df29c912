//! Persisted session storage.
//!
//! The authenticated session (token + user record) is stored as a single
//! JSON blob at `${TKT_HOME}/session.json` with restricted permissions
//! (0600). Tokens are never logged in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tkt_types::User;

use crate::config::paths;

/// The session blob written by login and removed by logout.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SavedSession {
    /// Bearer token for the tracker API.
    pub token: Option<String>,
    /// The user the token belongs to.
    pub user: Option<User>,
}

impl SavedSession {
    /// Returns the path to the session blob.
    pub fn path() -> PathBuf {
        paths::session_path()
    }

    /// Creates a session blob for a fresh login.
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    /// Returns true if the blob holds a usable token.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Loads the persisted session, tolerating a missing or corrupted blob.
    ///
    /// A blob that cannot be read or parsed yields an unauthenticated
    /// session; rehydration must never fail startup.
    pub fn load_or_default() -> Self {
        let path = Self::path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!("discarding corrupted session blob: {err}");
                Self::default()
            }),
            Err(err) => {
                tracing::warn!("failed to read session blob: {err}");
                Self::default()
            }
        }
    }

    /// Saves the session blob to disk with restricted permissions (0600).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save(&self) -> Result<()> {
        let path = Self::path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&path)
                .with_context(|| format!("Failed to open {} for writing", path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&path, contents)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        Ok(())
    }

    /// Removes the session blob. A missing blob is not an error.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn clear() -> Result<()> {
        let path = Self::path();
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::setup_temp_tkt_home;

    #[test]
    fn test_save_and_load_round_trip() {
        let (_guard, _temp) = setup_temp_tkt_home();

        let user = User {
            username: "foouser".to_string(),
            ..User::default()
        };
        SavedSession::new("token-123", user).save().unwrap();

        let loaded = SavedSession::load_or_default();
        assert!(loaded.is_authenticated());
        assert_eq!(loaded.token.as_deref(), Some("token-123"));
        assert_eq!(loaded.user.unwrap().username, "foouser");
    }

    #[test]
    fn test_corrupted_blob_yields_unauthenticated() {
        let (_guard, _temp) = setup_temp_tkt_home();

        fs::write(SavedSession::path(), "{not json at all").unwrap();

        let loaded = SavedSession::load_or_default();
        assert!(!loaded.is_authenticated());
        assert!(loaded.token.is_none());
        assert!(loaded.user.is_none());
    }

    #[test]
    fn test_missing_blob_yields_unauthenticated() {
        let (_guard, _temp) = setup_temp_tkt_home();

        let loaded = SavedSession::load_or_default();
        assert!(!loaded.is_authenticated());
    }

    #[test]
    fn test_clear_removes_blob() {
        let (_guard, _temp) = setup_temp_tkt_home();

        SavedSession::new("token-123", User::default())
            .save()
            .unwrap();
        assert!(SavedSession::path().exists());

        SavedSession::clear().unwrap();
        assert!(!SavedSession::path().exists());

        // Clearing again is a no-op
        SavedSession::clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_blob_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let (_guard, _temp) = setup_temp_tkt_home();

        SavedSession::new("token-123", User::default())
            .save()
            .unwrap();

        let mode = fs::metadata(SavedSession::path())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
