//! Completions command - generate shell completion scripts

use crate::cli::Cli;
use crate::error::DrydockResult;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

/// Execute the completions command
pub fn execute(shell: Shell) -> DrydockResult<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "drydock", &mut io::stdout());
    Ok(())
}
