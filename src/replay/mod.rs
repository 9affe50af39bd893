//! Session replay engine.
//!
//! Turns a [`Session`] into a lazy, ordered stream of [`TimedChunk`]s. Each
//! chunk carries its offset from the start of playback; a consumer that
//! waits until each offset before handling the chunk reproduces the
//! session's timing.
//!
//! Nothing here touches a clock. Pacing against real time is the
//! consumer's job (see [`crate::player`]).

mod pacing;

use std::iter::FusedIterator;
use std::time::Duration;

use serde::Serialize;

use crate::session::{Record, Repeat, Session};

pub use pacing::Pacing;

/// One record positioned on the playback timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimedChunk<'a> {
    /// Milliseconds from the start of playback.
    pub offset_ms: u64,
    /// Terminal output to emit at that point.
    pub content: &'a str,
}

impl TimedChunk<'_> {
    pub fn offset(&self) -> Duration {
        Duration::from_millis(self.offset_ms)
    }
}

/// One playthrough of a session, paced by the session's own config.
pub fn replay(session: &Session) -> Replay<'_> {
    session.replay()
}

/// `times` playthroughs of a session, back to back.
pub fn repeat(session: &Session, times: Repeat) -> Repeated<'_> {
    session.repeat(times)
}

/// Cursor over a single playthrough.
///
/// Cloning forks an independent cursor at the same position.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    records: &'a [Record],
    pacing: Pacing,
    next: usize,
    start_ms: u64,
    elapsed_ms: u64,
}

impl<'a> Replay<'a> {
    pub(crate) fn new(session: &'a Session, pacing: Pacing) -> Self {
        Self {
            records: session.records(),
            pacing,
            next: 0,
            start_ms: 0,
            elapsed_ms: 0,
        }
    }

    /// Shift the whole pass so its timeline begins at `start_ms`.
    fn starting_at(mut self, start_ms: u64) -> Self {
        self.start_ms = start_ms;
        self
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    /// Total duration of one full pass, in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.records.iter().fold(0u64, |total, record| {
            total.saturating_add(self.pacing.effective_delay(record.delay))
        })
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms())
    }

    /// Offset of the most recently emitted chunk (or of the pass start).
    fn position_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.elapsed_ms)
    }

    /// Rewind to the first record.
    pub fn restart(&mut self) {
        self.next = 0;
        self.elapsed_ms = 0;
    }
}

impl<'a> Iterator for Replay<'a> {
    type Item = TimedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.get(self.next)?;
        self.next += 1;
        self.elapsed_ms = self
            .elapsed_ms
            .saturating_add(self.pacing.effective_delay(record.delay));

        Some(TimedChunk {
            offset_ms: self.position_ms(),
            content: &record.content,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.records.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Replay<'_> {}

impl FusedIterator for Replay<'_> {}

/// Cursor over repeated playthroughs.
///
/// Every pass continues the timeline where the previous one ended. With
/// [`Repeat::Forever`] the iterator never ends on its own (unless the session
/// has no records); stop pulling from it to cancel.
#[derive(Debug, Clone)]
pub struct Repeated<'a> {
    template: Replay<'a>,
    pass: Replay<'a>,
    times: Repeat,
    passes_done: u64,
}

impl<'a> Repeated<'a> {
    pub fn new(replay: Replay<'a>, times: Repeat) -> Self {
        let mut template = replay;
        template.restart();
        tracing::debug!(
            records = template.records.len(),
            %times,
            "starting replay"
        );
        Self {
            pass: template.clone(),
            template,
            times,
            passes_done: 0,
        }
    }

    /// Number of fully completed passes so far.
    pub fn passes_done(&self) -> u64 {
        self.passes_done
    }

    /// Rewind to the first record of the first pass.
    pub fn restart(&mut self) {
        self.pass = self.template.clone();
        self.passes_done = 0;
    }

    fn is_done(&self) -> bool {
        if self.template.records.is_empty() {
            return true;
        }
        match self.times {
            Repeat::Forever => false,
            Repeat::Times(n) => self.passes_done >= n,
        }
    }
}

impl<'a> Iterator for Repeated<'a> {
    type Item = TimedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.is_done() {
                return None;
            }
            if let Some(chunk) = self.pass.next() {
                return Some(chunk);
            }
            self.passes_done += 1;
            let end = self.pass.position_ms();
            self.pass = self.template.clone().starting_at(end);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_done() {
            return (0, Some(0));
        }
        match self.times {
            Repeat::Forever => (usize::MAX, None),
            Repeat::Times(n) => {
                let per_pass = self.template.records.len() as u64;
                let later_passes = n - self.passes_done - 1;
                let remaining = later_passes
                    .checked_mul(per_pass)
                    .and_then(|r| r.checked_add(self.pass.len() as u64))
                    .and_then(|r| usize::try_from(r).ok());
                match remaining {
                    Some(r) => (r, Some(r)),
                    None => (usize::MAX, None),
                }
            }
        }
    }
}

impl FusedIterator for Repeated<'_> {}
