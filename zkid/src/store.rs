//! Client-side persistence of the secret key.
//!
//! The core never decides where a secret lives. Callers hand it a
//! [`SecretStore`] and the core only loads, saves or clears through it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::errors::ZkError;
use crate::keys::{Identity, SecretKey, generate_identity};

/// Storage capability for a single secret key.
pub trait SecretStore {
    /// Returns the stored key, or `None` if nothing has been saved.
    fn load(&self) -> Result<Option<SecretKey>, ZkError>;

    /// Replaces the stored key.
    fn save(&self, secret: &SecretKey) -> Result<(), ZkError>;

    /// Removes the stored key. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), ZkError>;
}

/// Loads the stored identity, or generates and saves a new one.
pub fn load_or_generate<S: SecretStore + ?Sized>(store: &S) -> Result<Identity, ZkError> {
    if let Some(secret) = store.load()? {
        debug!("loaded stored identity");
        return Ok(Identity::from_secret(secret));
    }

    let identity = generate_identity()?;
    store.save(identity.secret())?;
    info!(public_key = %identity.public().to_hex(), "generated new identity");
    Ok(identity)
}

/// Keeps the secret in process memory only.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    slot: RwLock<Option<SecretKey>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemorySecretStore {
    fn load(&self) -> Result<Option<SecretKey>, ZkError> {
        Ok(self.slot.read().clone())
    }

    fn save(&self, secret: &SecretKey) -> Result<(), ZkError> {
        *self.slot.write() = Some(secret.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ZkError> {
        *self.slot.write() = None;
        Ok(())
    }
}

/// Keeps the secret as a hex line in a file.
///
/// On Unix the file is created with mode `0600`.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SecretStore for FileSecretStore {
    fn load(&self) -> Result<Option<SecretKey>, ZkError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => Zeroizing::new(contents),
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        SecretKey::from_hex(contents.trim()).map(Some)
    }

    fn save(&self, secret: &SecretKey) -> Result<(), ZkError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut line = secret.to_hex();
        line.push('\n');
        fs::write(&self.path, line.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        debug!(path = %self.path.display(), "saved secret key");
        Ok(())
    }

    fn clear(&self) -> Result<(), ZkError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_secret(seed: u64) -> SecretKey {
        let mut rng = StdRng::seed_from_u64(seed);
        SecretKey::random(&mut rng).expect("seeded rng")
    }

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemorySecretStore::new();
        assert!(store.load().expect("load").is_none());

        let secret = sample_secret(1);
        store.save(&secret).expect("save");
        assert_eq!(store.load().expect("load"), Some(secret));

        store.clear().expect("clear");
        assert!(store.load().expect("load").is_none());
        store.clear().expect("clear twice");
    }

    #[test]
    fn test_file_store_lifecycle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileSecretStore::new(dir.path().join("keys").join("zk.secret"));
        assert!(store.load().expect("load").is_none());

        let secret = sample_secret(2);
        store.save(&secret).expect("save");
        let stored = fs::read_to_string(store.path()).expect("read");
        assert_eq!(stored.trim().len(), crate::constants::SK_HEX_LEN);
        assert_eq!(store.load().expect("load"), Some(secret));

        store.clear().expect("clear");
        assert!(!store.path().exists());
        store.clear().expect("clear twice");
    }

    #[test]
    fn test_file_store_rejects_corrupt_secret() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("zk.secret");
        fs::write(&path, "not a key\n").expect("write");

        let store = FileSecretStore::new(&path);
        assert!(matches!(store.load(), Err(ZkError::InvalidKey)));
    }

    #[test]
    fn test_load_or_generate_reuses_stored_secret() {
        let store = MemorySecretStore::new();
        let first = load_or_generate(&store).expect("generate");
        let second = load_or_generate(&store).expect("reload");
        assert_eq!(first.public(), second.public());
        assert_eq!(store.load().expect("load").as_ref(), Some(first.secret()));
    }
}
