//! Real-time playback of replayed sessions.
//!
//! The [`Player`] consumes any stream of [`TimedChunk`]s, waits until each
//! chunk's offset has elapsed, and writes its content to a sink unchanged.
//!
//! # Usage
//!
//! ```no_run
//! use termreel::player::{Player, PlaybackOutcome};
//! use termreel::Session;
//!
//! let session = Session::load("demo.yml").unwrap();
//! let mut player = Player::new(std::io::stdout());
//! match player.play(session.replay()).unwrap() {
//!     PlaybackOutcome::Finished { chunks } => eprintln!("played {} chunks", chunks),
//!     PlaybackOutcome::Interrupted { .. } => eprintln!("stopped"),
//! }
//! ```

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::replay::TimedChunk;

/// Longest single sleep between cancellation checks.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How a playback run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The stream ran out
    Finished { chunks: usize },
    /// The cancel flag was raised before the stream ran out
    Interrupted { chunks: usize },
}

impl PlaybackOutcome {
    pub fn chunks(&self) -> usize {
        match self {
            Self::Finished { chunks } | Self::Interrupted { chunks } => *chunks,
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted { .. })
    }
}

/// Paces chunks against the wall clock and writes them to `out`.
pub struct Player<W: Write> {
    out: W,
    cancel: Arc<AtomicBool>,
}

impl<W: Write> Player<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share an externally owned cancel flag (e.g. one set by a Ctrl-C handler).
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Flag that stops playback when set.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Play `chunks` in order, blocking until they are all written or the
    /// cancel flag is raised.
    pub fn play<'a, I>(&mut self, chunks: I) -> io::Result<PlaybackOutcome>
    where
        I: IntoIterator<Item = TimedChunk<'a>>,
    {
        let start = Instant::now();
        let mut played = 0;

        for chunk in chunks {
            if !self.wait_until(start.checked_add(chunk.offset())) {
                tracing::debug!(played, "playback interrupted");
                return Ok(PlaybackOutcome::Interrupted { chunks: played });
            }
            self.out.write_all(chunk.content.as_bytes())?;
            self.out.flush()?;
            played += 1;
        }

        tracing::debug!(played, elapsed = ?start.elapsed(), "playback finished");
        Ok(PlaybackOutcome::Finished { chunks: played })
    }

    /// Sleep until `deadline`, returning false if cancelled first.
    ///
    /// A `None` deadline lies beyond what `Instant` can represent and is only
    /// ever left by cancellation.
    fn wait_until(&self, deadline: Option<Instant>) -> bool {
        loop {
            if self.cancel.load(Ordering::Relaxed) {
                return false;
            }
            let now = Instant::now();
            let remaining = match deadline {
                Some(deadline) if deadline <= now => return true,
                Some(deadline) => deadline - now,
                None => POLL_INTERVAL,
            };
            thread::sleep(remaining.min(POLL_INTERVAL));
        }
    }
}
