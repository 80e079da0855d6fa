//! dexgen CLI: static Pokédex site generator.
//!
//! Reads a directory of YAML creature records and writes one HTML page per
//! record plus an index, linking evolution families together.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
