//! Build script for termreel - embeds git commit hash and build info
//!
//! When the `release` feature is NOT set (default dev builds):
//! - Emits `VERGEN_GIT_SHA` environment variable with the commit hash
//! - Emits `TERMREEL_BUILD_DATE` environment variable with the build date
//!
//! When the `release` feature IS set (CI/official builds):
//! - Emits build date only (clean version string without git hash)

use std::process::Command;

/// Get the current date in YYYY-MM-DD format
fn get_build_date() -> String {
    // Use the date command for cross-platform compatibility
    if let Ok(output) = Command::new("date").args(["+%Y-%m-%d"]).output() {
        if output.status.success() {
            return String::from_utf8_lossy(&output.stdout).trim().to_string();
        }
    }
    "unknown".to_string()
}

fn main() {
    println!("cargo:rustc-env=TERMREEL_BUILD_DATE={}", get_build_date());

    // Only emit git SHA when NOT building with --features release
    #[cfg(not(feature = "release"))]
    {
        use vergen_gitcl::{Emitter, GitclBuilder};

        // Fallback first; vergen's own instruction overrides it when git works
        println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");

        let git_result = GitclBuilder::default().sha(true).build();

        let emit_result = match git_result {
            Ok(git) => Emitter::default()
                .add_instructions(&git)
                .and_then(|emitter| emitter.emit()),
            Err(e) => {
                println!("cargo:warning=Failed to configure git info: {}", e);
                return;
            }
        };

        if let Err(e) = emit_result {
            // Not in a git repo, or git is missing
            println!("cargo:warning=Failed to get git info: {}", e);
        }
    }
}
