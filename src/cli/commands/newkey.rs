//! `key newkey` — generate a new master key at the configured path.
//!
//! If a key already exists it is only overwritten after the user proves
//! they know its password: replacing it loses access to every vault locked
//! with the old key.

use std::path::Path;

use crate::cli::{output, prompt_new_password, prompt_password};
use crate::errors::Result;
use crate::key::{KeyLookup, MasterKey};

/// Execute the `newkey` command.
pub fn execute(key_path: &Path) -> Result<()> {
    // 1. Re-authenticate against the existing key, if any.
    if let KeyLookup::Present(mut existing) = MasterKey::load(key_path)? {
        output::warning(
            "Generating a new key will overwrite your existing key, and you will lose \
             access to any vaults encrypted with the old key.",
        );
        output::info("Enter your existing key password to continue, or Ctrl+C to abort.");

        let password = prompt_password(false)?;
        existing.verify_password(password.as_bytes())?;
        output::info("Existing key verified, continuing...");
    }

    // 2. Choose the new password.
    output::info(
        "Choose a password to encrypt your key. IT IS VERY IMPORTANT YOU REMEMBER THIS PASSWORD!",
    );
    let password = prompt_new_password()?;

    // 3. Generate, wrap and write the key.
    MasterKey::create(key_path, password.as_bytes())?;

    output::success(&format!(
        "New key generated and saved to {}",
        output::path(key_path)
    ));
    Ok(())
}
