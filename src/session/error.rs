//! Session loading errors.

use std::path::PathBuf;

/// Errors that can occur while loading a session file.
///
/// Loading is all-or-nothing: any of these aborts the load and no
/// partially-built session is returned.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read session: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LoadError {
    /// Whether the document structure was malformed.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Whether a config option held an invalid value.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Structural problems in the session document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Session document must be a mapping with `config` and `records` keys")]
    NotAMapping,

    #[error("Missing required key `{0}`")]
    MissingKey(&'static str),

    #[error("`{key}` must be a {expected}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },

    #[error("Record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Record {index}: delay must not be negative (got {delay})")]
    NegativeDelay { index: usize, delay: i64 },
}

/// A config option that parsed but holds a value outside its domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("`{key}` must be a positive integer or \"auto\" (got {value})")]
    InvalidDimension { key: &'static str, value: String },

    #[error("`{key}` must be a non-negative number of milliseconds or \"auto\" (got {value})")]
    InvalidTiming { key: &'static str, value: String },

    #[error("`quality` must be an integer between 1 and 100 (got {0})")]
    InvalidQuality(String),

    #[error("`repeat` must be -1, 0 or a positive integer (got {0})")]
    InvalidRepeat(String),

    #[error("`cursorStyle` must be one of block, underline, bar (got {0})")]
    InvalidCursorStyle(String),
}
