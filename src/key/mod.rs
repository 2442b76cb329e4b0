//! The master key: one random 256-bit key, stored on disk wrapped under
//! the user's password.
//!
//! Lifecycle:
//! - `MasterKey::load` reads an existing key file (`KeyLookup::Absent` if
//!   there is none), `MasterKey::create` runs the new-key ceremony.
//! - `unwrap` decrypts the raw key into memory; `wipe` zeroes it again.
//! - `with_unwrapped` does both around a closure, so the raw key is wiped
//!   on every exit path.
//!
//! The raw key is never written anywhere.

pub mod file;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use zeroize::Zeroize;

use crate::crypto::{envelope, RawKey};
use crate::errors::{KeyVaultError, Result};
use crate::storage::{self, Permissions};

/// Whether the raw key is currently held in memory.
enum KeyState {
    Wrapped,
    Unwrapped(RawKey),
}

/// A password-wrapped master key bound to its file path.
pub struct MasterKey {
    path: PathBuf,
    /// Password envelope (salt || nonce || ciphertext+tag), without the
    /// key-file version byte.
    wrapped: Vec<u8>,
    state: KeyState,
}

/// Result of looking for a key file.
pub enum KeyLookup {
    Present(MasterKey),
    /// Nothing at the path; the caller should offer to create a key.
    Absent,
}

impl KeyLookup {
    /// Turn `Absent` into `KeyNotFound` for callers that need a key.
    pub fn require(self, path: &Path) -> Result<MasterKey> {
        match self {
            KeyLookup::Present(key) => Ok(key),
            KeyLookup::Absent => Err(KeyVaultError::KeyNotFound(path.to_path_buf())),
        }
    }
}

impl MasterKey {
    /// Read the key file at `path`.
    ///
    /// A missing file is `Absent`; any other read failure is an error.
    pub fn load(path: &Path) -> Result<KeyLookup> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no key file");
                return Ok(KeyLookup::Absent);
            }
            Err(e) => return Err(e.into()),
        };

        let wrapped = file::decode(&bytes)?.to_vec();
        tracing::debug!(path = %path.display(), "key file loaded");

        Ok(KeyLookup::Present(Self {
            path: path.to_path_buf(),
            wrapped,
            state: KeyState::Wrapped,
        }))
    }

    /// Generate a fresh random key and wrap it under `password`.
    ///
    /// Nothing is written; call `save` to persist it.  The raw key is
    /// zeroed before this returns.
    pub fn generate(path: &Path, password: &[u8]) -> Result<Self> {
        let raw = RawKey::generate();
        let wrapped = envelope::wrap(raw.as_bytes(), password)?;

        Ok(Self {
            path: path.to_path_buf(),
            wrapped,
            state: KeyState::Wrapped,
        })
    }

    /// Generate a new key and write it to `path` with owner-only permissions.
    ///
    /// Overwrites any existing key.  Re-authenticating against the old key
    /// first is the caller's job.
    pub fn create(path: &Path, password: &[u8]) -> Result<Self> {
        let key = Self::generate(path, password)?;
        key.save()?;
        Ok(key)
    }

    /// Write the wrapped key to its path atomically, creating the parent
    /// directory if needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        storage::write_atomic(&self.path, &file::encode(&self.wrapped), Permissions::OwnerOnly)?;
        tracing::info!(path = %self.path.display(), "key written");
        Ok(())
    }

    /// Decrypt the raw key into memory.
    ///
    /// Calling this again re-derives and replaces the in-memory key.
    pub fn unwrap(&mut self, password: &[u8]) -> Result<()> {
        let secret = envelope::unwrap(&self.wrapped, password)?;
        let raw = RawKey::from_slice(&secret)?;

        // The previous RawKey, if any, is zeroed when dropped here.
        self.state = KeyState::Unwrapped(raw);
        tracing::debug!("key decrypted");
        Ok(())
    }

    /// Zero the raw key and forget it.  A no-op when nothing is unwrapped.
    pub fn wipe(&mut self) {
        if let KeyState::Unwrapped(mut raw) = std::mem::replace(&mut self.state, KeyState::Wrapped)
        {
            raw.zeroize();
            tracing::debug!("key cleared from memory");
        }
    }

    /// Unwrap with `password`, run `f` with the raw key, then wipe.
    ///
    /// The key is wiped whether `f` succeeds, fails, or panics.
    pub fn with_unwrapped<T>(
        &mut self,
        password: &[u8],
        f: impl FnOnce(&RawKey) -> Result<T>,
    ) -> Result<T> {
        let guard = WipeOnDrop(self);
        guard.0.unwrap(password)?;
        let key = guard.0.raw_key()?;
        let result = f(key);
        drop(guard);
        result
    }

    /// Check `password` against the stored key without keeping the raw key.
    pub fn verify_password(&mut self, password: &[u8]) -> Result<()> {
        self.with_unwrapped(password, |_| Ok(()))
    }

    /// The raw key, if `unwrap` has succeeded and `wipe` has not run since.
    pub fn raw_key(&self) -> Result<&RawKey> {
        match &self.state {
            KeyState::Unwrapped(raw) => Ok(raw),
            KeyState::Wrapped => Err(KeyVaultError::KeyNotUnwrapped),
        }
    }

    pub fn is_unwrapped(&self) -> bool {
        matches!(self.state, KeyState::Unwrapped(_))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The password envelope as it is stored (minus the version byte).
    pub fn wrapped_bytes(&self) -> &[u8] {
        &self.wrapped
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("path", &self.path)
            .field("unwrapped", &self.is_unwrapped())
            .finish_non_exhaustive()
    }
}

struct WipeOnDrop<'a>(&'a mut MasterKey);

impl Drop for WipeOnDrop<'_> {
    fn drop(&mut self) {
        self.0.wipe();
    }
}
