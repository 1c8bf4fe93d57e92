//! Labsift command-line interface.

use clap::Parser;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_categories, run_check, run_extract};

fn main() {
    let cli = Cli::parse();
    labsift_lib::logging::init_tracing(cli.verbose);

    let result = match &cli.command {
        Command::Extract(args) => run_extract(args),
        Command::Check(args) => run_check(args),
        Command::Categories => run_categories(),
    };

    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
