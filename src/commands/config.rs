//! Config subcommands handler

use anyhow::{Context, Result};

use termreel::Settings;

/// Show current settings as TOML.
pub fn handle_show(settings: &Settings) -> Result<()> {
    print!("{}", settings.to_toml()?);
    Ok(())
}

/// Print where the settings file lives (whether or not it exists yet).
pub fn handle_path() -> Result<()> {
    println!("{}", Settings::config_path()?.display());
    Ok(())
}

/// Open the settings file in the default editor.
///
/// Uses $EDITOR environment variable (defaults to 'vi').
#[cfg(not(tarpaulin_include))]
pub fn handle_edit() -> Result<()> {
    let config_path = Settings::config_path()?;

    // Ensure settings exist so the editor opens something useful
    if !config_path.exists() {
        Settings::default().save_to(&config_path)?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    println!("Opening {} with {}", config_path.display(), editor);

    let status = std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to open editor: {}", editor))?;

    if !status.success() {
        tracing::warn!(%status, "editor exited with an error");
    }

    // Surface syntax errors now rather than on the next run
    Settings::load_from(&config_path)?;
    Ok(())
}
