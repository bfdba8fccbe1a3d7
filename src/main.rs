mod cli;
mod core;
mod domain;
mod infra;

use clap::Parser;
use cli::commands::{Cli, print_error, run};

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(err) = run(cli) {
        print_error(&err, verbose);
        std::process::exit(1);
    }
}
