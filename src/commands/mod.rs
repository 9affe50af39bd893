//! Subcommand handlers.

pub mod completions;
pub mod config;
pub mod info;
pub mod play;
pub mod timeline;

use std::path::Path;

use anyhow::{Context, Result};
use termreel::Session;

/// Load a session file, attaching the path to any error.
pub fn load_session(path: &Path) -> Result<Session> {
    Session::load(path).with_context(|| format!("Failed to load session {}", path.display()))
}
