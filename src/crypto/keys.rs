//! In-memory holder for raw 256-bit key material.

use std::fmt;

use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::encryption::KEY_LEN;
use crate::errors::{KeyVaultError, Result};

/// A wrapper around a 32-byte key that automatically zeroes its memory
/// when dropped.
///
/// Used both for the unwrapped master key and for password-derived
/// wrapping keys, so neither lingers after it is no longer needed.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct RawKey {
    bytes: [u8; KEY_LEN],
}

impl RawKey {
    /// Create a `RawKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Generate a fresh key from the operating system's CSPRNG.
    pub fn generate() -> Self {
        let mut key = Self::zeroed();
        rand::rng().fill_bytes(&mut key.bytes);
        key
    }

    /// Copy a key out of a slice, rejecting anything that is not 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            KeyVaultError::InvalidKey(format!(
                "expected {KEY_LEN} bytes of key material, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self { bytes })
    }

    pub(crate) fn zeroed() -> Self {
        Self {
            bytes: [0u8; KEY_LEN],
        }
    }

    /// Access the raw key bytes (e.g. to pass to encryption).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8; KEY_LEN] {
        &mut self.bytes
    }
}

impl fmt::Debug for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawKey([REDACTED])")
    }
}
