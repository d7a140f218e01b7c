use crate::escape_sequences::DEFAULT_ESCAPE_TIMEOUT_MS;
use crate::key_table::KeyTable;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ESCAPE_TIMEOUT_ENV: &str = "KEY_READER_ESCAPE_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keep reading after the first keystroke.
    pub continuous: bool,
    /// How long a follow-up byte may take before a single keystroke is considered done.
    pub escape_timeout_ms: u16,
    /// Extra key names, as `name = "notation"`.
    pub keys: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            continuous: false,
            escape_timeout_ms: DEFAULT_ESCAPE_TIMEOUT_MS,
            keys: BTreeMap::new(),
        }
    }
}

pub fn parse_env_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("key-reader").join("config.toml"))
    }

    /// Loads `path`, or the default location when `path` is `None`.
    /// A missing file at the default location is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_file(path, true);
        }
        match Self::default_path() {
            Some(path) => Self::load_file(&path, false),
            None => Ok(Self::default()),
        }
    }

    fn load_file(path: &Path, required: bool) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                log::debug!("loading config from {}", path.display());
                Self::from_toml(&text).with_context(|| format!("Invalid config {}", path.display()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn apply_env(&mut self) {
        self.escape_timeout_ms = parse_env_var(ESCAPE_TIMEOUT_ENV, self.escape_timeout_ms);
    }

    /// The built-in key names extended with this config's `keys`.
    pub fn key_table(&self) -> Result<KeyTable> {
        let mut table = KeyTable::builtin();
        table.extend_from_notation(&self.keys)?;
        Ok(table)
    }
}
