//! On-disk encoding of the password-wrapped master key.
//!
//! ```text
//! [version: 1 byte = 0x01][salt: 16][nonce: 12][ciphertext + tag: 48]
//! ```
//!
//! Files written before the version byte existed are exactly the
//! envelope (76 bytes) and are still accepted.  Both use the same fixed
//! PBKDF2 parameters; a parameter change must bump the version.

use crate::crypto::{KEY_LEN, NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::errors::{KeyVaultError, Result};

/// Version byte written at the start of every new key file.
pub const KEY_FILE_VERSION: u8 = 1;

/// Size of an unversioned key file: the bare envelope around a 32-byte key.
pub const LEGACY_KEY_FILE_LEN: usize = SALT_LEN + NONCE_LEN + KEY_LEN + TAG_LEN;

/// Prefix a wrapped key with the current version byte.
pub fn encode(wrapped: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + wrapped.len());
    buf.push(KEY_FILE_VERSION);
    buf.extend_from_slice(wrapped);
    buf
}

/// Return the password envelope stored in a key file.
pub fn decode(file_bytes: &[u8]) -> Result<&[u8]> {
    if file_bytes.len() == LEGACY_KEY_FILE_LEN {
        return Ok(file_bytes);
    }

    match file_bytes.split_first() {
        None => Err(KeyVaultError::Format("key file is empty".into())),
        Some((&KEY_FILE_VERSION, envelope)) => Ok(envelope),
        Some((&other, _)) => Err(KeyVaultError::UnsupportedKeyVersion(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_decode_strips_version() {
        let envelope = vec![0x5A; LEGACY_KEY_FILE_LEN];
        let file = encode(&envelope);
        assert_eq!(file.len(), LEGACY_KEY_FILE_LEN + 1);
        assert_eq!(file[0], KEY_FILE_VERSION);
        assert_eq!(decode(&file).unwrap(), envelope.as_slice());
    }

    #[test]
    fn legacy_length_is_read_verbatim() {
        // The first byte is salt here, not a version.
        let legacy = vec![0xEE; LEGACY_KEY_FILE_LEN];
        assert_eq!(decode(&legacy).unwrap(), legacy.as_slice());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let err = decode(&[0x07, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, KeyVaultError::UnsupportedKeyVersion(0x07)));
    }

    #[test]
    fn empty_file_is_format_error() {
        assert!(matches!(decode(&[]).unwrap_err(), KeyVaultError::Format(_)));
    }
}
