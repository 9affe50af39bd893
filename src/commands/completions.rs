//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::Shell;

use termreel::cli::Cli;

/// Write completions for `shell` to stdout.
pub fn handle(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
