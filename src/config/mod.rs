use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::core::ViewState;

const DEFAULT_TICK_MS: u64 = 200;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid TOML in {}: {}", path.display(), source.message().replace('\n', " "))]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Tab shown at startup (e.g. "attendance")
    pub default_tab: Option<String>,

    /// Initial class dropdown value (e.g. "Class A")
    pub default_class: Option<String>,

    /// Initial date-range dropdown value (e.g. "Last 3 Months")
    pub default_range: Option<String>,

    pub tick_rate_ms: Option<u64>,

    pub log_file: Option<String>,
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(
            self.tick_rate_ms
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_TICK_MS),
        )
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .and_then(expand_path)
            .or_else(|| data_dir().map(|dir| dir.join("edfloor.log")))
    }

    /// Apply the configured startup selection. A bad value is skipped and
    /// reported; the remaining values still apply.
    pub fn apply_defaults(&self, view: &mut ViewState) -> Vec<String> {
        let results = [
            self.default_tab.as_deref().map(|v| view.set_active_tab(v)),
            self.default_class.as_deref().map(|v| view.set_selected_class(v)),
            self.default_range.as_deref().map(|v| view.set_date_range(v)),
        ];
        results
            .into_iter()
            .flatten()
            .filter_map(Result::err)
            .map(|err| {
                warn!("ignoring config default: {err}");
                format!("Config: {err}")
            })
            .collect()
    }
}

/// Load the config from the default location. No file means defaults.
pub fn load() -> Result<Config, ConfigError> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("EDFLOOR_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("edfloor").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("edfloor").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "edfloor", "edfloor")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("edfloor"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("edfloor"));
    }
    directories::ProjectDirs::from("io", "edfloor", "edfloor")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

fn expand_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
            return Some(home.join(rest));
        }
    }
    Some(PathBuf::from(trimmed))
}
