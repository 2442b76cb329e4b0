//! Vault module — files encrypted in place with the master key.
//!
//! This module provides:
//! - The locked-file layout and marker detection (`format`)
//! - The `Vault` handle with its lock/unlock transitions (`store`)

pub mod format;
pub mod store;

pub use format::{detect, VaultState, MAGIC};
pub use store::Vault;
