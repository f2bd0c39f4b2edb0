//! CLI entry point for build order reconstruction

use clap::Parser;
use unbuild::io::cli::{Cli, run};
use unbuild::io::logging::init_logging;

fn main() -> unbuild::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    run(cli)
}
