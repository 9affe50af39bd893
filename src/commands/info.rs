//! `termreel info`: summary of a session file.

use std::path::Path;

use anyhow::Result;
use humansize::{format_size, DECIMAL};
use terminal_size::{terminal_size, Height, Width};

use termreel::{Dimension, Session};

/// Size assumed for `auto` dimensions when stdout is not a terminal.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

pub fn handle(file: &Path) -> Result<()> {
    let session = super::load_session(file)?;
    print!("{}", summarize(file, &session, current_terminal_size()));
    Ok(())
}

fn current_terminal_size() -> (u16, u16) {
    terminal_size()
        .map(|(Width(w), Height(h))| (w, h))
        .unwrap_or(FALLBACK_SIZE)
}

/// Render the summary block. `terminal` resolves `auto` dimensions.
fn summarize(file: &Path, session: &Session, terminal: (u16, u16)) -> String {
    let config = session.config();
    let cols = config.cols.resolve(terminal.0);
    let rows = config.rows.resolve(terminal.1);
    let auto_note = if config.cols == Dimension::Auto || config.rows == Dimension::Auto {
        " (auto)"
    } else {
        ""
    };

    let style_keys: Vec<&str> = config.style.keys().map(String::as_str).collect();
    let style_keys = if style_keys.is_empty() {
        "-".to_string()
    } else {
        style_keys.join(", ")
    };

    let idle_cap = if config.frame_delay.is_auto() {
        config.max_idle_time.to_string()
    } else {
        format!("{} (unused, fixed frame delay)", config.max_idle_time)
    };

    let mut out = String::new();
    let mut line = |label: &str, value: String| {
        out.push_str(&format!("{:<13}{}\n", format!("{label}:"), value));
    };
    line("File", file.display().to_string());
    line("Size", format!("{cols}x{rows}{auto_note}"));
    line("Frame delay", config.frame_delay.to_string());
    line("Idle cap", idle_cap);
    line("Repeat", config.repeat.to_string());
    line("Quality", config.quality.to_string());
    line("Cursor", config.cursor_style.to_string());
    line("Records", session.len().to_string());
    line("Content", format_size(session.content_bytes(), DECIMAL));
    line("Duration", format_duration(session.replay().duration_ms()));
    line("Style keys", style_keys);
    out
}

/// Human-readable duration, e.g. "350ms", "2.2s", "1m 5s", "1h 1m 1s".
fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        return format!("{ms}ms");
    }
    let secs = ms / 1000;
    if secs < 60 {
        return format!("{:.1}s", ms as f64 / 1000.0);
    }
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}h {m}m {s}s")
    } else {
        format!("{m}m {s}s")
    }
}
