//! Locked-vault file format and format detection.
//!
//! A locked vault file has this layout:
//!
//! ```text
//! [KEYVLT01: 8 bytes][nonce: 12 bytes][ciphertext + 16-byte tag]
//! ```
//!
//! Anything that does not start with the marker (including an empty file
//! or one shorter than 8 bytes) is plaintext.

use zeroize::Zeroizing;

use crate::crypto::encryption;
use crate::errors::{KeyVaultError, Result};

/// Marker at the start of every locked vault file.
pub const MAGIC: &[u8; 8] = b"KEYVLT01";

/// Which side of the lock a vault file is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    Locked,
    Unlocked,
}

impl std::fmt::Display for VaultState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaultState::Locked => f.write_str("locked"),
            VaultState::Unlocked => f.write_str("unlocked"),
        }
    }
}

/// Classify raw file bytes by the presence of the marker.
///
/// Truncated ciphertext behind a valid marker still classifies as
/// `Locked`; it fails later, when decrypted.
pub fn detect(bytes: &[u8]) -> VaultState {
    if bytes.starts_with(MAGIC) {
        VaultState::Locked
    } else {
        VaultState::Unlocked
    }
}

/// Encrypt `plaintext` and prepend the marker.
pub fn seal(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let ciphertext = encryption::encrypt(key, plaintext)?;

    let mut buf = Vec::with_capacity(MAGIC.len() + ciphertext.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&ciphertext);
    Ok(buf)
}

/// Strip the marker and decrypt.
pub fn open(key: &[u8], locked: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let body = locked
        .strip_prefix(MAGIC.as_slice())
        .ok_or_else(|| KeyVaultError::Format("missing KEYVLT01 marker".into()))?;

    encryption::decrypt(key, body).map(Zeroizing::new)
}
