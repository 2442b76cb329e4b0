use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{KeyVaultError, Result};

/// Tool configuration, loaded from `config.toml`.
///
/// Every field has a default so the tool works without any config file.
/// The value is built once at startup and passed by reference to whatever
/// needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Where the wrapped master key is stored.  May start with `~`,
    /// `$HOME` or `${HOME}`.
    #[serde(default = "default_key_path")]
    pub key_path: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_key_path() -> String {
    "$HOME/.key/key.pem".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_path: default_key_path(),
        }
    }
}

const CONFIG_HEADER: &str = "# Key Manager Configuration\n";

impl Settings {
    /// Name of the config file we look for.
    pub const FILE_NAME: &'static str = "config.toml";

    /// Load settings from the first `config.toml` found in `search_dirs`.
    ///
    /// Returns `None` if none of the directories has one.  A file that
    /// exists but cannot be parsed is an error.
    pub fn load_from(search_dirs: &[PathBuf]) -> Result<Option<Self>> {
        for dir in search_dirs {
            let config_path = dir.join(Self::FILE_NAME);
            if !config_path.is_file() {
                continue;
            }

            let contents = fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&contents).map_err(|e| {
                KeyVaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
            })?;
            tracing::debug!(path = %config_path.display(), "config loaded");
            return Ok(Some(settings));
        }

        Ok(None)
    }

    /// Load settings from `./config.toml` or `~/.key/config.toml`.
    ///
    /// If neither exists, a default config is written to
    /// `~/.key/config.toml` (failure to write is only a warning) and the
    /// defaults are returned.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let mut search_dirs = vec![cwd];
        if let Some(dir) = config_dir() {
            search_dirs.push(dir);
        }

        if let Some(settings) = Self::load_from(&search_dirs)? {
            return Ok(settings);
        }

        if let Some(dir) = config_dir() {
            if let Err(e) = write_default_config(&dir) {
                tracing::warn!(dir = %dir.display(), "could not write default config: {e}");
            }
        }

        Ok(Self::default())
    }

    /// The key path with `~` / `$HOME` expanded.
    pub fn resolved_key_path(&self) -> Result<PathBuf> {
        expand_home(&self.key_path, home_dir().as_deref())
    }
}

/// `~/.key`, the per-user config and key directory.
pub fn config_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".key"))
}

fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Write the default config into `dir`, creating it if needed.
pub fn write_default_config(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(Settings::FILE_NAME);
    let body = toml::to_string(&Settings::default())
        .map_err(|e| KeyVaultError::Config(format!("Failed to serialize defaults: {e}")))?;
    fs::write(&path, format!("{CONFIG_HEADER}{body}"))?;
    tracing::info!(path = %path.display(), "created default config");
    Ok(path)
}

/// Expand a leading `~`, `$HOME` or `${HOME}` in `raw`.
pub fn expand_home(raw: &str, home: Option<&Path>) -> Result<PathBuf> {
    let rest = if raw == "~" || raw == "$HOME" || raw == "${HOME}" {
        Some("")
    } else {
        ["~/", "$HOME/", "${HOME}/"]
            .iter()
            .find_map(|prefix| raw.strip_prefix(prefix))
    };

    match rest {
        None => Ok(PathBuf::from(raw)),
        Some(rest) => {
            let home = home.ok_or_else(|| {
                KeyVaultError::Config(format!("cannot expand '{raw}': home directory unknown"))
            })?;
            Ok(if rest.is_empty() {
                home.to_path_buf()
            } else {
                home.join(rest)
            })
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
