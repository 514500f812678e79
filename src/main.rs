use anyhow::Result;
use clap::Parser;
use sente::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
