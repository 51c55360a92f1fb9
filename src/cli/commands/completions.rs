//! `faultkit completions` command - shell completion scripts

use clap::CommandFactory;
use miette::Result;
use std::io;

use crate::cli::args::{Cli, CompletionsArgs};

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "faultkit", &mut io::stdout());
    Ok(())
}
