//! Cryptographic primitives.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - Password envelopes that wrap a secret under a password (`envelope`)
//! - A zeroize-on-drop holder for raw key material (`keys`)

pub mod encryption;
pub mod envelope;
pub mod kdf;
pub mod keys;

pub use encryption::{decrypt, encrypt, KEY_LEN, NONCE_LEN, TAG_LEN};
pub use envelope::{unwrap, wrap};
pub use kdf::{derive_key, generate_salt, PBKDF2_ITERATIONS, SALT_LEN};
pub use keys::RawKey;
