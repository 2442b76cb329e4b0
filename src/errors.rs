use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while managing the master key and vaults.
#[derive(Debug, Error)]
pub enum KeyVaultError {
    // --- Password errors ---
    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("Password mismatch — passwords do not match")]
    PasswordMismatch,

    // --- Crypto errors ---
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Invalid format: {0}")]
    Format(String),

    /// Covers both a wrong password and tampered or corrupted data.
    #[error("Decryption failed — wrong password or corrupted data")]
    Authentication,

    // --- Master key errors ---
    #[error("Key cannot be found at {0}")]
    KeyNotFound(PathBuf),

    #[error("Master key has not been unwrapped")]
    KeyNotUnwrapped,

    #[error("Unsupported key file version {0}")]
    UnsupportedKeyVersion(u8),

    // --- Vault errors ---
    #[error("Vault {0} is already locked")]
    AlreadyLocked(PathBuf),

    #[error("Vault {0} is already unlocked")]
    AlreadyUnlocked(PathBuf),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, KeyVaultError>;
