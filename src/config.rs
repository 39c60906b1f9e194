//! User settings: `config.toml` in the platform config dir, then environment
//! overrides (a `.env` file is honoured through dotenvy).
//!
//! ```toml
//! page_size = 15
//! label = "> "
//! theme = "light"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::prompt::{DEFAULT_LABEL, DEFAULT_PAGE_SIZE};
use crate::theme::ThemePreset;

pub const ENV_PAGE_SIZE: &str = "SEARCH_PROMPT_PAGE_SIZE";
pub const ENV_LABEL: &str = "SEARCH_PROMPT_LABEL";
pub const ENV_THEME: &str = "SEARCH_PROMPT_THEME";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Visible rows. Kept signed so that bad values reach validation instead
    /// of failing to parse.
    pub page_size: i64,
    pub label: String,
    pub theme: ThemePreset,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            label: DEFAULT_LABEL.to_string(),
            theme: ThemePreset::default(),
        }
    }
}

impl Settings {
    /// Settings from the default config file (if any) plus environment.
    pub fn load() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                let mut settings = Self::default();
                settings.apply_env()?;
                Ok(settings)
            }
        }
    }

    /// Settings from `path` plus environment. A missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut settings = match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(err) => return Err(err.into()),
        };
        settings.apply_env()?;
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(raw) = dotenvy::var(ENV_PAGE_SIZE) {
            self.page_size = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_PAGE_SIZE.to_string(),
                value: raw.clone(),
            })?;
        }
        if let Ok(label) = dotenvy::var(ENV_LABEL) {
            self.label = label;
        }
        if let Ok(theme) = dotenvy::var(ENV_THEME) {
            self.theme = theme.parse()?;
        }
        Ok(())
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "search-prompt", "search-prompt")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Where the log file goes.
pub fn default_data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}
