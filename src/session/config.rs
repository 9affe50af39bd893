//! Rendering and timing options from the `config` section.
//!
//! Only the options that drive replay timing (and a few enumerated ones that
//! can be validated) are typed. Everything else, such as `theme`, `frameBox`,
//! `watermark` or font settings, is kept verbatim in [`Config::style`] for
//! whatever renderer consumes the replay.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU16;
use std::str::FromStr;

use serde::Deserialize;
use serde_yaml::Value;

use super::error::{ConfigError, ParseError};

/// Sentinel used by every option that can be derived at runtime.
const AUTO: &str = "auto";

/// Default idle cap, in milliseconds.
pub const DEFAULT_MAX_IDLE_TIME: u64 = 2000;

/// Default render quality.
pub const DEFAULT_QUALITY: u8 = 100;

/// Terminal width or height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    /// Use the size of whatever terminal is doing the rendering.
    #[default]
    Auto,
    Fixed(NonZeroU16),
}

impl Dimension {
    /// Resolve to a concrete size, using `fallback` for `Auto`.
    pub fn resolve(self, fallback: u16) -> u16 {
        match self {
            Self::Auto => fallback,
            Self::Fixed(n) => n.get(),
        }
    }

    fn from_value(key: &'static str, value: Option<Value>) -> Result<Self, ConfigError> {
        let Some(value) = value else {
            return Ok(Self::Auto);
        };
        if is_auto(&value) {
            return Ok(Self::Auto);
        }
        value
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .and_then(NonZeroU16::new)
            .map(Self::Fixed)
            .ok_or_else(|| ConfigError::InvalidDimension {
                key,
                value: describe(&value),
            })
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "{AUTO}"),
            Self::Fixed(n) => write!(f, "{n}"),
        }
    }
}

/// A millisecond duration that may be left to the player (`"auto"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    Auto,
    Millis(u64),
}

impl Timing {
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    fn from_value(
        key: &'static str,
        value: Option<Value>,
        default: Timing,
    ) -> Result<Self, ConfigError> {
        let Some(value) = value else {
            return Ok(default);
        };
        if is_auto(&value) {
            return Ok(Self::Auto);
        }
        value
            .as_u64()
            .map(Self::Millis)
            .ok_or_else(|| ConfigError::InvalidTiming {
                key,
                value: describe(&value),
            })
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "{AUTO}"),
            Self::Millis(ms) => write!(f, "{ms}ms"),
        }
    }
}

/// How many times a session is played through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Loop until the consumer stops pulling.
    Forever,
    /// A fixed number of playthroughs (at least one).
    Times(u64),
}

impl Repeat {
    /// Exactly one playthrough.
    pub const ONCE: Repeat = Repeat::Times(1);

    /// Interpret the integer form used in session files.
    ///
    /// `0` loops forever, `-1` plays once, `n > 0` plays `n` times.
    pub fn from_count(count: i64) -> Result<Self, ConfigError> {
        match count {
            0 => Ok(Self::Forever),
            -1 => Ok(Self::ONCE),
            n if n > 0 => Ok(Self::Times(n as u64)),
            n => Err(ConfigError::InvalidRepeat(n.to_string())),
        }
    }

    pub fn is_forever(self) -> bool {
        matches!(self, Self::Forever)
    }

    fn from_value(value: Option<Value>) -> Result<Self, ConfigError> {
        match value {
            None => Ok(Self::Forever),
            Some(value) => match value.as_i64() {
                Some(n) => Self::from_count(n),
                None => Err(ConfigError::InvalidRepeat(describe(&value))),
            },
        }
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forever => write!(f, "forever"),
            Self::Times(1) => write!(f, "once"),
            Self::Times(n) => write!(f, "{n} times"),
        }
    }
}

/// Cursor shape drawn by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Block,
    Underline,
    Bar,
}

impl CursorStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Underline => "underline",
            Self::Bar => "bar",
        }
    }
}

impl FromStr for CursorStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(Self::Block),
            "underline" => Ok(Self::Underline),
            "bar" => Ok(Self::Bar),
            other => Err(ConfigError::InvalidCursorStyle(other.to_string())),
        }
    }
}

impl fmt::Display for CursorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated session configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub cols: Dimension,
    pub rows: Dimension,
    /// Fixed delay applied to every record, or `Auto` to use recorded delays.
    pub frame_delay: Timing,
    /// Cap on recorded delays. Only consulted when `frame_delay` is `Auto`.
    pub max_idle_time: Timing,
    pub quality: u8,
    pub repeat: Repeat,
    pub cursor_style: CursorStyle,
    /// Every other key of the section, untouched.
    pub style: BTreeMap<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cols: Dimension::Auto,
            rows: Dimension::Auto,
            frame_delay: Timing::Auto,
            max_idle_time: Timing::Millis(DEFAULT_MAX_IDLE_TIME),
            quality: DEFAULT_QUALITY,
            repeat: Repeat::Forever,
            cursor_style: CursorStyle::Block,
            style: BTreeMap::new(),
        }
    }
}

/// Wire form of the section. Typed options stay as raw values so that
/// out-of-domain values surface as [`ConfigError`] instead of a serde error.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawConfig {
    cols: Option<Value>,
    rows: Option<Value>,
    frame_delay: Option<Value>,
    max_idle_time: Option<Value>,
    quality: Option<Value>,
    repeat: Option<Value>,
    cursor_style: Option<Value>,
    #[serde(flatten)]
    style: BTreeMap<String, Value>,
}

impl Config {
    /// Build a config from the value of the `config` key.
    pub(crate) fn from_value(value: &Value) -> Result<Self, super::LoadError> {
        if !value.is_mapping() {
            return Err(ParseError::WrongType {
                key: "config",
                expected: "mapping",
            }
            .into());
        }
        let raw: RawConfig = serde_yaml::from_value(value.clone()).map_err(ParseError::Yaml)?;
        Ok(Self::from_raw(raw)?)
    }

    /// Opaque `theme` mapping, if present.
    pub fn theme(&self) -> Option<&Value> {
        self.style.get("theme")
    }

    /// Opaque `frameBox` mapping, if present.
    pub fn frame_box(&self) -> Option<&Value> {
        self.style.get("frameBox")
    }

    /// Opaque `watermark` mapping, if present.
    pub fn watermark(&self) -> Option<&Value> {
        self.style.get("watermark")
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let quality = match raw.quality {
            None => DEFAULT_QUALITY,
            Some(value) => value
                .as_u64()
                .filter(|q| (1..=100).contains(q))
                .map(|q| q as u8)
                .ok_or_else(|| ConfigError::InvalidQuality(describe(&value)))?,
        };

        let cursor_style = match raw.cursor_style {
            None => CursorStyle::default(),
            Some(Value::String(s)) => s.parse()?,
            Some(other) => return Err(ConfigError::InvalidCursorStyle(describe(&other))),
        };

        Ok(Self {
            cols: Dimension::from_value("cols", raw.cols)?,
            rows: Dimension::from_value("rows", raw.rows)?,
            frame_delay: Timing::from_value("frameDelay", raw.frame_delay, Timing::Auto)?,
            max_idle_time: Timing::from_value(
                "maxIdleTime",
                raw.max_idle_time,
                Timing::Millis(DEFAULT_MAX_IDLE_TIME),
            )?,
            quality,
            repeat: Repeat::from_value(raw.repeat)?,
            cursor_style,
            style: raw.style,
        })
    }
}

fn is_auto(value: &Value) -> bool {
    value.as_str() == Some(AUTO)
}

/// Short rendering of a YAML value for error messages.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{s:?}"),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| "<unprintable>".to_string()),
    }
}
