//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  There is no way for a caller to pass
//! a nonce in, so a nonce can never be reused under the same key.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{KeyVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Size of the symmetric key in bytes.
pub const KEY_LEN: usize = 32;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext || tag).
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = cipher_for(key)?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| KeyVaultError::EncryptionFailed(e.to_string()))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `encrypt`.
///
/// Expects the first 12 bytes to be the nonce, followed by the ciphertext.
/// A blob that fails tag verification yields `Authentication`, whether the
/// key was wrong or the bytes were altered.
pub fn decrypt(key: &[u8], ciphertext_with_nonce: &[u8]) -> Result<Vec<u8>> {
    let cipher = cipher_for(key)?;

    if ciphertext_with_nonce.len() < NONCE_LEN {
        return Err(KeyVaultError::Format("ciphertext too short".into()));
    }

    let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| KeyVaultError::Authentication)
}

fn cipher_for(key: &[u8]) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key).map_err(|_| {
        KeyVaultError::InvalidKey(format!(
            "expected a {KEY_LEN}-byte key, got {} bytes",
            key.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_nonce_plus_ciphertext_plus_tag() {
        let key = [7u8; KEY_LEN];
        let blob = encrypt(&key, b"abc").unwrap();
        assert_eq!(blob.len(), NONCE_LEN + 3 + TAG_LEN);
    }

    #[test]
    fn empty_plaintext_still_carries_tag() {
        let key = [7u8; KEY_LEN];
        let blob = encrypt(&key, b"").unwrap();
        assert_eq!(blob.len(), NONCE_LEN + TAG_LEN);
        assert!(decrypt(&key, &blob).unwrap().is_empty());
    }

    #[test]
    fn rejects_short_key() {
        let err = encrypt(&[0u8; 16], b"data").unwrap_err();
        assert!(matches!(err, KeyVaultError::InvalidKey(_)));

        let err = decrypt(&[0u8; 31], &[0u8; 40]).unwrap_err();
        assert!(matches!(err, KeyVaultError::InvalidKey(_)));
    }

    #[test]
    fn bad_key_reported_before_short_blob() {
        let err = decrypt(&[0u8; 16], &[0u8; 3]).unwrap_err();
        assert!(matches!(err, KeyVaultError::InvalidKey(_)));
    }

    #[test]
    fn blob_shorter_than_nonce_is_format_error() {
        let err = decrypt(&[0u8; KEY_LEN], &[0u8; NONCE_LEN - 1]).unwrap_err();
        assert!(matches!(err, KeyVaultError::Format(_)));
    }

    #[test]
    fn nonce_only_blob_fails_authentication() {
        let err = decrypt(&[0u8; KEY_LEN], &[0u8; NONCE_LEN]).unwrap_err();
        assert!(matches!(err, KeyVaultError::Authentication));
    }
}
