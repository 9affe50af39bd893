//! Command-line interface definitions.
//!
//! Lives in the library so that `xtask` can build man pages from the same
//! definitions the binary parses.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::replay::Pacing;
use crate::session::{Config, Repeat};
use crate::settings::PlaybackSettings;

#[cfg(not(feature = "release"))]
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("TERMREEL_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("TERMREEL_BUILD_DATE"),
    ")"
);

/// Replay recorded terminal sessions with their recorded timing.
#[derive(Parser, Debug)]
#[command(name = "termreel", version, long_version = LONG_VERSION)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a recorded session in this terminal
    Play(PlayArgs),

    /// Show a summary of a recorded session
    Info {
        /// Session file (YAML)
        file: PathBuf,
    },

    /// Print the computed replay timeline
    Timeline(TimelineArgs),

    /// Show or edit termreel settings
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Session file (YAML)
    pub file: PathBuf,

    #[command(flatten)]
    pub pacing: PacingArgs,

    /// Playthroughs: -1 once, 0 loop until Ctrl-C, N times [default: -1]
    #[arg(long, allow_negative_numbers = true, value_parser = parse_repeat)]
    pub repeat: Option<Repeat>,
}

#[derive(Args, Debug)]
pub struct TimelineArgs {
    /// Session file (YAML)
    pub file: PathBuf,

    #[command(flatten)]
    pub pacing: PacingArgs,

    /// Playthroughs: -1 once, 0 forever (needs --limit), N times [default: -1]
    #[arg(long, allow_negative_numbers = true, value_parser = parse_repeat)]
    pub repeat: Option<Repeat>,

    /// Stop after this many chunks
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print the timeline as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Options overriding how delays are computed.
#[derive(Args, Debug, Clone, Default)]
pub struct PacingArgs {
    /// Use the recorded delays, ignoring frameDelay and maxIdleTime
    #[arg(short, long)]
    pub real_timing: bool,

    /// Multiply every delay by this factor (0.5 plays twice as fast)
    #[arg(short, long, value_parser = parse_speed_factor)]
    pub speed_factor: Option<f64>,
}

impl PacingArgs {
    /// Pacing for `config`, with settings defaults and then flags applied.
    pub fn resolve(&self, config: &Config, defaults: &PlaybackSettings) -> Pacing {
        let mut pacing = defaults.apply(Pacing::from_config(config));
        if self.real_timing {
            pacing = pacing.real_timing(true);
        }
        if let Some(factor) = self.speed_factor {
            pacing = pacing.speed_factor(factor);
        }
        pacing
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current settings as TOML
    Show,
    /// Open the settings file in $EDITOR
    Edit,
    /// Print the settings file location
    Path,
}

fn parse_repeat(s: &str) -> Result<Repeat, String> {
    let count: i64 = s
        .parse()
        .map_err(|_| format!("`{s}` is not an integer"))?;
    Repeat::from_count(count).map_err(|e| e.to_string())
}

fn parse_speed_factor(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => Ok(f),
        _ => Err(format!("`{s}` is not a non-negative number")),
    }
}
