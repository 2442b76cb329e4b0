//! CLI module — Clap argument parser, password prompts, output helpers,
//! and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{KeyVaultError, Result};
use crate::key::MasterKey;

/// Environment variable holding the key password for scripted use.
pub const PASSWORD_ENV: &str = "KEY_PASSWORD";

/// Environment variable holding the password for a key being created.
/// Falls back to `KEY_PASSWORD` when unset.
pub const NEW_PASSWORD_ENV: &str = "KEY_NEW_PASSWORD";

/// Use a 'key' to lock, unlock, and create vaults.
#[derive(Parser)]
#[command(
    name = "key",
    about = "Use a 'key' to lock, unlock, and create vaults",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override key file path
    #[arg(long, env = "KEY_KEY_PATH", global = true)]
    pub key_path: Option<String>,

    /// Enable verbose output (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate a new key at your configured key path
    #[command(name = "newkey", alias = "new-key")]
    NewKey,

    /// Lock a file
    Lock {
        /// File to encrypt in place
        file: PathBuf,
    },

    /// Unlock a file
    Unlock {
        /// File to decrypt in place
        file: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the key password, trying in order:
/// 1. `KEY_PASSWORD` env var (scripts, CI)
/// 2. Interactive prompt, with a second confirmation prompt if `confirm`
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(confirm: bool) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env(PASSWORD_ENV) {
        return Ok(pw);
    }
    read_password(confirm)
}

/// Get the password for a new key: `KEY_NEW_PASSWORD`, then
/// `KEY_PASSWORD`, then an interactive prompt with confirmation.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env(NEW_PASSWORD_ENV) {
        return Ok(pw);
    }
    prompt_password(true)
}

fn password_from_env(var: &str) -> Option<Zeroizing<String>> {
    std::env::var(var)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

fn read_password(confirm: bool) -> Result<Zeroizing<String>> {
    let password = Zeroizing::new(ask("Enter password")?);
    if password.is_empty() {
        return Err(KeyVaultError::EmptyPassword);
    }

    if !confirm {
        return check_password(password, None);
    }

    let confirmation = Zeroizing::new(ask("Confirm password")?);
    check_password(password, Some(confirmation.as_str()))
}

fn ask(prompt: &str) -> Result<String> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| KeyVaultError::CommandFailed(format!("password prompt: {e}")))
}

/// Reject an empty password, and a confirmation that does not match.
///
/// The comparison runs in constant time.
pub fn check_password(
    password: Zeroizing<String>,
    confirmation: Option<&str>,
) -> Result<Zeroizing<String>> {
    if password.is_empty() {
        return Err(KeyVaultError::EmptyPassword);
    }

    if let Some(confirmation) = confirmation {
        if !bool::from(password.as_bytes().ct_eq(confirmation.as_bytes())) {
            return Err(KeyVaultError::PasswordMismatch);
        }
    }

    Ok(password)
}

/// Resolve the key file path: `--key-path` / `KEY_KEY_PATH` if given,
/// otherwise the `key_path` from `config.toml`.
pub fn resolve_key_path(cli: &Cli) -> Result<PathBuf> {
    let settings = match &cli.key_path {
        Some(path) => Settings {
            key_path: path.clone(),
        },
        None => Settings::load()?,
    };
    let path = settings.resolved_key_path()?;
    tracing::debug!(key_path = %path.display(), "using key");
    Ok(path)
}

/// Load the master key, pointing the user at `key newkey` if there is none.
pub fn load_master_key(path: &Path) -> Result<MasterKey> {
    let result = MasterKey::load(path)?.require(path);
    if let Err(KeyVaultError::KeyNotFound(_)) = &result {
        output::tip("Have you run `key newkey`?");
    }
    result
}
