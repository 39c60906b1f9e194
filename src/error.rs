//! Error types for prompt configuration and the prompt loop.

use thiserror::Error;

/// Problems detected while configuring a prompt. Always raised before the
/// terminal is touched.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("page size must be a positive integer, got {0}")]
    InvalidPageSize(i64),

    #[error(
        "no display converter configured; call `converter(..)`, or `use_display()` for `Display` types"
    )]
    MissingConverter,

    #[error("Failed to read config file: {0}")]
    ReadFile(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("invalid value {value:?} for environment variable {key}")]
    InvalidEnv { key: String, value: String },

    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
}

/// Errors surfaced by a running prompt.
#[derive(Error, Debug)]
pub enum PromptError {
    /// Only reachable by calling `Selection::current` on an empty view; the
    /// prompt loop never confirms an empty view.
    #[error("no candidate is selected")]
    EmptySelection,

    #[error("prompt cancelled")]
    Cancelled,

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PromptError>;
