use clap::CommandFactory;
use clap_complete::{generate, Shell};

use checkreg::error::Result;

use super::Cli;

pub fn run(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "checkreg", &mut std::io::stdout());
    Ok(())
}
