//! datasift - CSV cleaning, statistics & report CLI
//!
//! Thin command-line front end over the `datasift` library.

mod cli;

use clap::Parser;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    datasift::logging::init(cli.verbose)?;
    cli::run(cli)
}
