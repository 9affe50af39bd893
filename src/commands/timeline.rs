//! `termreel timeline`: print computed chunk offsets without waiting.

use std::io::{self, Write};

use anyhow::{bail, Result};

use termreel::cli::TimelineArgs;
use termreel::{Repeat, Repeated, Settings, TimedChunk};

pub fn handle(args: &TimelineArgs, settings: &Settings) -> Result<()> {
    let times = args.repeat.unwrap_or(Repeat::ONCE);
    if times.is_forever() && args.limit.is_none() {
        bail!("an endless timeline needs --limit");
    }

    let session = super::load_session(&args.file)?;
    let pacing = args.pacing.resolve(session.config(), &settings.playback);
    let chunks = Repeated::new(session.replay_with(pacing), times)
        .take(args.limit.unwrap_or(usize::MAX));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let chunks: Vec<TimedChunk<'_>> = chunks.collect();
        serde_json::to_writer_pretty(&mut out, &chunks)?;
        writeln!(out)?;
    } else {
        write_lines(&mut out, chunks)?;
    }
    Ok(())
}

/// One line per chunk: offset in ms, then the content as a JSON string so
/// control characters stay visible.
fn write_lines<'a, W: Write>(
    out: &mut W,
    chunks: impl Iterator<Item = TimedChunk<'a>>,
) -> Result<()> {
    for chunk in chunks {
        writeln!(
            out,
            "{:<8} {}",
            chunk.offset_ms,
            serde_json::to_string(chunk.content)?
        )?;
    }
    Ok(())
}
