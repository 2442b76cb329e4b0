//! `key unlock <FILE>` — decrypt a locked file in place.

use std::path::Path;

use crate::cli::{load_master_key, output, prompt_password};
use crate::errors::Result;
use crate::vault::Vault;

/// Execute the `unlock` command.
pub fn execute(key_path: &Path, file: &Path) -> Result<()> {
    let password = prompt_password(false)?;

    output::info("Unlocking file...");
    let mut vault = Vault::load(file)?;
    let mut master = load_master_key(key_path)?;

    master.with_unwrapped(password.as_bytes(), |key| vault.unlock(key.as_bytes()))?;

    output::success(&format!("{} unlocked successfully!", output::path(file)));
    Ok(())
}
