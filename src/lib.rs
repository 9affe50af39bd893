//! termreel library
//!
//! Load recorded terminal sessions and replay them with accurate timing.
//!
//! - [`session`]: parsing and validating session files
//! - [`replay`]: lazy, ordered timelines of output chunks
//! - [`player`]: real-time playback to any writer
//! - [`settings`]: the CLI's own settings file

pub mod cli;
pub mod player;
pub mod replay;
pub mod session;
pub mod settings;

pub use player::{PlaybackOutcome, Player};
pub use replay::{repeat, replay, Pacing, Repeated, Replay, TimedChunk};
pub use session::{
    Config, ConfigError, CursorStyle, Dimension, LoadError, ParseError, Record, Repeat, Session,
    Timing,
};
pub use settings::Settings;
