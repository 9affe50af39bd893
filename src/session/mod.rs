//! Recorded session files.
//!
//! A session file is a YAML document with two top-level keys:
//!
//! ```yaml
//! config:
//!   cols: 80
//!   rows: auto
//!   frameDelay: auto
//!   maxIdleTime: 2000
//! records:
//!   - delay: 120
//!     content: "\e[1;32m$\e[0m "
//!   - delay: 900
//!     content: "ls\r\n"
//! ```
//!
//! Loading validates everything up front and produces an immutable
//! [`Session`]. Replays borrow the session, so one loaded session can be
//! replayed any number of times, from any number of threads.

mod config;
mod error;

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

pub use config::{
    Config, CursorStyle, Dimension, Repeat, Timing, DEFAULT_MAX_IDLE_TIME, DEFAULT_QUALITY,
};
pub use error::{ConfigError, LoadError, ParseError};

use crate::replay::{Pacing, Repeated, Replay};

/// One captured chunk of terminal output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Milliseconds to wait before this record is played.
    pub delay: u64,
    /// Raw terminal output, escape sequences included.
    pub content: String,
}

impl Record {
    pub fn new(delay: u64, content: impl Into<String>) -> Self {
        Self {
            delay,
            content: content.into(),
        }
    }

    /// Parse one entry of the `records` sequence.
    fn from_value(index: usize, value: &Value) -> Result<Self, ParseError> {
        let invalid = |reason: &str| ParseError::InvalidRecord {
            index,
            reason: reason.to_string(),
        };

        let entry = value.as_mapping().ok_or_else(|| invalid("must be a mapping"))?;

        let delay = entry.get("delay").ok_or_else(|| invalid("missing `delay`"))?;
        let delay = match delay.as_u64() {
            Some(ms) => ms,
            None => match delay.as_i64() {
                Some(ms) => return Err(ParseError::NegativeDelay { index, delay: ms }),
                None => return Err(invalid("`delay` must be an integer")),
            },
        };

        let content = entry
            .get("content")
            .ok_or_else(|| invalid("missing `content`"))?
            .as_str()
            .ok_or_else(|| invalid("`content` must be a string"))?;

        Ok(Self::new(delay, content))
    }
}

/// A loaded session: configuration plus the ordered records.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    config: Config,
    records: Vec<Record>,
}

impl Session {
    pub fn new(config: Config, records: Vec<Record>) -> Self {
        Self { config, records }
    }

    /// Load a session file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let session = Self::from_yaml(&source)?;
        tracing::debug!(
            path = %path.display(),
            records = session.records.len(),
            "loaded session"
        );
        Ok(session)
    }

    /// Load a session from any reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, LoadError> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Self::from_yaml(&source)
    }

    /// Parse a session document held in memory.
    pub fn from_yaml(source: &str) -> Result<Self, LoadError> {
        let document: Value = serde_yaml::from_str(source).map_err(ParseError::Yaml)?;
        let root = document.as_mapping().ok_or(ParseError::NotAMapping)?;

        let config = root.get("config").ok_or(ParseError::MissingKey("config"))?;
        let records = root
            .get("records")
            .ok_or(ParseError::MissingKey("records"))?
            .as_sequence()
            .ok_or(ParseError::WrongType {
                key: "records",
                expected: "sequence",
            })?;

        let config = Config::from_value(config)?;
        let records = records
            .iter()
            .enumerate()
            .map(|(index, value)| Record::from_value(index, value))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { config, records })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total size of all record contents in bytes.
    pub fn content_bytes(&self) -> usize {
        self.records.iter().map(|r| r.content.len()).sum()
    }

    /// One playthrough paced by this session's own config.
    pub fn replay(&self) -> Replay<'_> {
        Replay::new(self, Pacing::from_config(&self.config))
    }

    /// One playthrough under a custom pacing policy.
    pub fn replay_with(&self, pacing: Pacing) -> Replay<'_> {
        Replay::new(self, pacing)
    }

    /// Repeated playthroughs paced by this session's own config.
    pub fn repeat(&self, times: Repeat) -> Repeated<'_> {
        Repeated::new(self.replay(), times)
    }
}
