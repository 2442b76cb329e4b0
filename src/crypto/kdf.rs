//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The parameters are fixed constants shared by every wrap and unwrap.
//! They are not stored in the envelope, so changing any of them makes
//! existing key files unreadable; a new parameter set needs a new key
//! file version (see `key::file`).

use rand::RngCore;
use sha2::Sha256;

use super::keys::RawKey;

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Derive a 32-byte key from a password and salt.
///
/// The same password + salt will always produce the same key.
pub fn derive_key(password: &[u8], salt: &[u8]) -> RawKey {
    let mut key = RawKey::zeroed();
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, PBKDF2_ITERATIONS, key.as_mut_bytes());
    key
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
