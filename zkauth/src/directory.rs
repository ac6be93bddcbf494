//! User directory: username → registered public key.
//!
//! The directory is an external collaborator of the identification core.
//! Two implementations are provided: an in-memory map and a JSON file with
//! the same layout as the `users.json` the web frontend wrote.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    /// Compressed SEC1 public key, lowercase hex.
    pub public_key: String,
    /// Registration time, milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl UserRecord {
    /// New record stamped with the current time.
    pub fn new(username: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            public_key: public_key.into(),
            created_at: Utc::now().timestamp_millis(),
        }
    }
}

/// Lookup and registration of public keys by username.
pub trait UserDirectory: Send + Sync {
    /// Fetch the record for `username`.
    fn get_user(&self, username: &str) -> Result<Option<UserRecord>>;

    /// Insert `record` unless the username is taken.
    ///
    /// Returns `false` without modifying anything if a record exists.
    fn create_user(&self, record: UserRecord) -> Result<bool>;
}

impl<T: UserDirectory + ?Sized> UserDirectory for Arc<T> {
    fn get_user(&self, username: &str) -> Result<Option<UserRecord>> {
        (**self).get_user(username)
    }

    fn create_user(&self, record: UserRecord) -> Result<bool> {
        (**self).create_user(record)
    }
}

/// Directory held in process memory.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl UserDirectory for MemoryDirectory {
    fn get_user(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.read().get(username).cloned())
    }

    fn create_user(&self, record: UserRecord) -> Result<bool> {
        let mut users = self.users.write();
        if users.contains_key(&record.username) {
            return Ok(false);
        }
        users.insert(record.username.clone(), record);
        Ok(true)
    }
}

/// Directory persisted as a JSON object keyed by username.
///
/// The whole file is rewritten on each registration through a temporary
/// file and a rename, so readers never observe a partial write.
#[derive(Debug)]
pub struct JsonFileDirectory {
    path: PathBuf,
    users: RwLock<HashMap<String, UserRecord>>,
}

impl JsonFileDirectory {
    /// Open `path`, creating an empty directory file if none exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let users = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            let empty = HashMap::new();
            write_atomically(&path, &empty)?;
            tracing::info!(path = %path.display(), "created empty user directory");
            empty
        };

        tracing::info!(path = %path.display(), users = users.len(), "loaded user directory");
        Ok(Self {
            path,
            users: RwLock::new(users),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UserDirectory for JsonFileDirectory {
    fn get_user(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.read().get(username).cloned())
    }

    fn create_user(&self, record: UserRecord) -> Result<bool> {
        let mut users = self.users.write();
        if users.contains_key(&record.username) {
            return Ok(false);
        }

        let username = record.username.clone();
        users.insert(username.clone(), record);
        if let Err(err) = write_atomically(&self.path, &users) {
            users.remove(&username);
            return Err(err);
        }
        Ok(true)
    }
}

fn write_atomically(path: &Path, users: &HashMap<String, UserRecord>) -> Result<()> {
    let json = serde_json::to_string_pretty(users)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
