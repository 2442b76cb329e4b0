//! Password envelopes: a secret encrypted under a password-derived key.
//!
//! Layout of a wrapped blob:
//!
//! ```text
//! [0:16]   salt (random per wrap)
//! [16:28]  nonce
//! [28:]    ciphertext || 16-byte tag
//! ```
//!
//! A wrong password and a corrupted blob both surface as
//! `KeyVaultError::Authentication`.

use zeroize::Zeroizing;

use super::encryption::{self, NONCE_LEN};
use super::kdf::{derive_key, generate_salt, SALT_LEN};
use crate::errors::{KeyVaultError, Result};

/// Smallest blob `unwrap` will look at: a salt and a nonce.
pub const MIN_WRAPPED_LEN: usize = SALT_LEN + NONCE_LEN;

/// Encrypt `secret` under a key derived from `password` and a fresh salt.
pub fn wrap(secret: &[u8], password: &[u8]) -> Result<Vec<u8>> {
    let salt = generate_salt();
    let key = derive_key(password, &salt);

    let sealed = encryption::encrypt(key.as_bytes(), secret)?;

    let mut output = Vec::with_capacity(SALT_LEN + sealed.len());
    output.extend_from_slice(&salt);
    output.extend_from_slice(&sealed);
    Ok(output)
}

/// Recover the secret from a blob produced by `wrap`.
pub fn unwrap(blob: &[u8], password: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    if blob.len() < MIN_WRAPPED_LEN {
        return Err(KeyVaultError::Format("ciphertext too short".into()));
    }

    let (salt, sealed) = blob.split_at(SALT_LEN);
    let key = derive_key(password, salt);

    encryption::decrypt(key.as_bytes(), sealed).map(Zeroizing::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_layout_has_salt_nonce_and_tag() {
        let blob = wrap(&[0x42; 32], b"pw").unwrap();
        assert_eq!(blob.len(), SALT_LEN + NONCE_LEN + 32 + 16);
    }

    #[test]
    fn minimum_length_blob_is_not_a_format_error() {
        let err = unwrap(&[0u8; MIN_WRAPPED_LEN], b"pw").unwrap_err();
        assert!(matches!(err, KeyVaultError::Authentication));
    }

    #[test]
    fn short_blob_is_format_error() {
        let err = unwrap(&[0u8; MIN_WRAPPED_LEN - 1], b"pw").unwrap_err();
        assert!(matches!(err, KeyVaultError::Format(_)));
        assert!(err.to_string().contains("ciphertext too short"));
    }

    #[test]
    fn empty_secret_roundtrips() {
        let blob = wrap(b"", b"pw").unwrap();
        assert_eq!(blob.len(), MIN_WRAPPED_LEN + 16);
        assert!(unwrap(&blob, b"pw").unwrap().is_empty());
    }
}
