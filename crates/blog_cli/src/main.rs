//! Blog records admin CLI.
//!
//! # Responsibility
//! - Parse arguments and dispatch to `blog_core` services.
//! - Print errors to stderr and exit non-zero on failure.

mod args;
mod commands;

use clap::Parser;

fn main() {
    let cli = args::Cli::parse();
    if let Err(message) = commands::run(cli) {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
