//! A single vault file and its lock/unlock transitions.
//!
//! Each transition re-reads the file, transforms the whole content in
//! memory, and replaces the file atomically.  The handle's state always
//! matches the disk after a successful transition.  Nothing guards against
//! another process touching the same file concurrently.

use std::fs;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use super::format::{self, VaultState};
use crate::errors::{KeyVaultError, Result};
use crate::storage::{self, Permissions};

/// File content, tagged by which side of the lock it is on.
enum VaultContent {
    /// Marker + nonce + ciphertext, exactly as on disk.
    Locked(Vec<u8>),
    /// Plaintext; zeroed when replaced or dropped.
    Unlocked(Zeroizing<Vec<u8>>),
}

/// A file that can be locked and unlocked with the master key.
pub struct Vault {
    path: PathBuf,
    content: VaultContent,
}

impl Vault {
    /// Read `path` and classify it as locked or unlocked.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let content = classify(bytes);

        let vault = Self {
            path: path.to_path_buf(),
            content,
        };
        tracing::debug!(path = %path.display(), state = %vault.state(), "vault loaded");
        Ok(vault)
    }

    /// Decrypt the file in place.
    ///
    /// Fails with `AlreadyUnlocked` (file untouched) if it is plaintext.
    pub fn unlock(&mut self, key: &[u8]) -> Result<()> {
        if self.state() == VaultState::Unlocked {
            return Err(KeyVaultError::AlreadyUnlocked(self.path.clone()));
        }

        let locked = match self.reload()? {
            VaultContent::Locked(bytes) => bytes,
            unlocked @ VaultContent::Unlocked(_) => {
                self.content = unlocked;
                return Err(KeyVaultError::AlreadyUnlocked(self.path.clone()));
            }
        };

        let plaintext = format::open(key, &locked)?;
        storage::write_atomic(&self.path, &plaintext, Permissions::Preserve)?;

        self.content = VaultContent::Unlocked(plaintext);
        tracing::info!(path = %self.path.display(), "vault unlocked");
        Ok(())
    }

    /// Encrypt the file in place.
    ///
    /// Fails with `AlreadyLocked` (file untouched) if it already carries
    /// the marker.
    pub fn lock(&mut self, key: &[u8]) -> Result<()> {
        if self.state() == VaultState::Locked {
            return Err(KeyVaultError::AlreadyLocked(self.path.clone()));
        }

        let plaintext = match self.reload()? {
            VaultContent::Unlocked(bytes) => bytes,
            locked @ VaultContent::Locked(_) => {
                self.content = locked;
                return Err(KeyVaultError::AlreadyLocked(self.path.clone()));
            }
        };

        let sealed = format::seal(key, &plaintext)?;
        storage::write_atomic(&self.path, &sealed, Permissions::Preserve)?;

        self.content = VaultContent::Locked(sealed);
        tracing::info!(path = %self.path.display(), "vault locked");
        Ok(())
    }

    pub fn state(&self) -> VaultState {
        match self.content {
            VaultContent::Locked(_) => VaultState::Locked,
            VaultContent::Unlocked(_) => VaultState::Unlocked,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state() == VaultState::Locked
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current content as last read or written: ciphertext when locked,
    /// plaintext when unlocked.
    pub fn content(&self) -> &[u8] {
        match &self.content {
            VaultContent::Locked(bytes) => bytes.as_slice(),
            VaultContent::Unlocked(bytes) => bytes.as_slice(),
        }
    }

    fn reload(&self) -> Result<VaultContent> {
        Ok(classify(fs::read(&self.path)?))
    }
}

fn classify(bytes: Vec<u8>) -> VaultContent {
    match format::detect(&bytes) {
        VaultState::Locked => VaultContent::Locked(bytes),
        VaultState::Unlocked => VaultContent::Unlocked(Zeroizing::new(bytes)),
    }
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("path", &self.path)
            .field("state", &self.state())
            .field("len", &self.content().len())
            .finish()
    }
}
