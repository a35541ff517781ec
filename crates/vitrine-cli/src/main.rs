//! Vitrine - vehicle and residence catalog with reservations
//!
//! A CLI over the local catalog document: browse, administer and book items.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
