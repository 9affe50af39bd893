//! `termreel play`: real-time playback to stdout.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use terminal_size::{terminal_size, Width};

use termreel::cli::PlayArgs;
use termreel::{Dimension, PlaybackOutcome, Player, Repeat, Repeated, Settings};

/// Conventional exit status for a process stopped by SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

/// Reset SGR attributes and show the cursor again.
const RESTORE_TERMINAL: &[u8] = b"\x1b[0m\x1b[?25h";

#[cfg(not(tarpaulin_include))]
pub fn handle(args: &PlayArgs, settings: &Settings) -> Result<ExitCode> {
    let session = super::load_session(&args.file)?;
    let pacing = args.pacing.resolve(session.config(), &settings.playback);
    let times = args.repeat.unwrap_or(Repeat::ONCE);

    let is_tty = atty::is(atty::Stream::Stdout);
    if !is_tty {
        tracing::warn!("stdout is not a terminal; escape sequences are written as-is");
    }
    if let (Dimension::Fixed(cols), Some((Width(width), _))) =
        (session.config().cols, terminal_size())
    {
        if cols.get() > width {
            tracing::warn!(
                recorded = cols.get(),
                terminal = width,
                "terminal is narrower than the recording; lines may wrap"
            );
        }
    }
    if times.is_forever() {
        tracing::info!("looping until Ctrl-C");
    }

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        ctrlc::set_handler(move || cancel.store(true, Ordering::Relaxed))
            .context("Failed to install Ctrl-C handler")?;
    }

    let mut player = Player::new(io::stdout().lock()).with_cancel(cancel);
    let outcome = player
        .play(Repeated::new(session.replay_with(pacing), times))
        .context("Failed to write to stdout")?;

    let mut stdout = player.into_inner();
    if is_tty {
        stdout.write_all(RESTORE_TERMINAL)?;
        stdout.flush()?;
    }

    Ok(match outcome {
        PlaybackOutcome::Finished { .. } => ExitCode::SUCCESS,
        PlaybackOutcome::Interrupted { chunks } => {
            tracing::info!(chunks, "playback interrupted");
            ExitCode::from(EXIT_INTERRUPTED)
        }
    })
}
