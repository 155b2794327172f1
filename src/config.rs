use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use thiserror::Error;

/// Reserved key naming the label to use when no source pins a version.
pub const DEFAULT_KEY: &str = "default";

const CONFIG_FILE_NAME: &str = "php-dispatch";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config directory {} not found", .0.display())]
    ConfigDirMissing(PathBuf),
    #[error("empty config at {}: add 'default = <label>' and one '<label> = <path>' per installed PHP", .0.display())]
    Empty(PathBuf),
    #[error("config has no '{DEFAULT_KEY}' entry")]
    MissingDefault,
    #[error("'{DEFAULT_KEY}' points to '{0}', which is not a configured version")]
    DanglingDefault(String),
}

/// The installed-versions table from `~/.config/php-dispatch`.
///
/// Keys are version labels mapped to absolute binary paths, plus the
/// reserved `default` entry. Loaded once per invocation, read-only after.
#[derive(Debug, Clone)]
pub struct ConfigTable {
    entries: BTreeMap<String, String>,
}

impl ConfigTable {
    pub fn default_label(&self) -> &str {
        self.entries
            .get(DEFAULT_KEY)
            .map(String::as_str)
            .expect("validated at load")
    }

    pub fn binary_for(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }

    /// All version labels except the reserved `default` entry.
    pub fn candidates(&self) -> Vec<String> {
        self.entries
            .keys()
            .filter(|key| key.as_str() != DEFAULT_KEY)
            .cloned()
            .collect()
    }
}

/// Locate the config file under an explicitly supplied home directory.
///
/// The `.config` directory must already exist; the file itself is created
/// empty on first run so the user has something to edit.
pub fn config_path(home: &Path) -> Result<PathBuf, ConfigError> {
    let config_dir = home.join(".config");
    if !config_dir.is_dir() {
        return Err(ConfigError::ConfigDirMissing(config_dir));
    }
    Ok(config_dir.join(CONFIG_FILE_NAME))
}

pub fn load_config(path: &Path) -> anyhow::Result<ConfigTable> {
    if !path.exists() {
        fs::write(path, "")
            .with_context(|| format!("creating config file at {}", path.display()))?;
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config at {}", path.display()))?;
    if content.trim().is_empty() {
        return Err(ConfigError::Empty(path.to_path_buf()).into());
    }

    let table = parse_table(&content);
    validate_table(table).map_err(Into::into)
}

/// Parse `key = value` lines. Blank lines, `#` comments, and anything not
/// shaped like an assignment are skipped without complaint.
fn parse_table(content: &str) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || !key.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
            continue;
        }

        entries.insert(key.to_string(), value.to_string());
    }

    entries
}

fn validate_table(entries: BTreeMap<String, String>) -> Result<ConfigTable, ConfigError> {
    let Some(default) = entries.get(DEFAULT_KEY) else {
        return Err(ConfigError::MissingDefault);
    };
    if !entries.contains_key(default.as_str()) {
        return Err(ConfigError::DanglingDefault(default.clone()));
    }
    Ok(ConfigTable { entries })
}
