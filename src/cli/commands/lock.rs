//! `key lock <FILE>` — encrypt a file in place with the master key.

use std::path::Path;

use crate::cli::{load_master_key, output, prompt_password};
use crate::errors::Result;
use crate::vault::Vault;

/// Execute the `lock` command.
pub fn execute(key_path: &Path, file: &Path) -> Result<()> {
    let password = prompt_password(false)?;

    output::info("Locking file...");
    let mut vault = Vault::load(file)?;
    let mut master = load_master_key(key_path)?;

    // The raw key is wiped as soon as this returns, error or not.
    master.with_unwrapped(password.as_bytes(), |key| vault.lock(key.as_bytes()))?;

    output::success(&format!("{} locked successfully.", output::path(file)));
    Ok(())
}
