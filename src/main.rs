//! ka CLI
//!
//! Command-line entry point for the Orus package manager

use clap::Parser;
use std::process;

use ka::cli::{Cli, CliContext, Driver};
use ka::package::{GitFetcher, ProjectLayout};
use ka::toolchain::ToolchainConfig;

fn main() {
    let cli = Cli::parse();

    // Change to specified directory if provided
    if let Some(dir) = &cli.directory {
        if let Err(e) = std::env::set_current_dir(dir) {
            eprintln!("error: Failed to change directory to {:?}: {}", dir, e);
            process::exit(1);
        }
    }

    let context = CliContext::new(cli.verbose, cli.quiet);
    let driver = Driver::new(
        context.clone(),
        ProjectLayout::new("."),
        ToolchainConfig::from_env(),
        Box::new(GitFetcher::default()),
    );

    // A toolchain exit status arrives as Ok(code) and is never rendered as
    // an error, so only genuine failures reach the error line.
    match driver.dispatch(&cli.command) {
        Ok(code) => process::exit(code),
        Err(e) => {
            context.error(&e.to_string());
            process::exit(1);
        }
    }
}
