//! filabel - filename-pattern-based labeling of GitHub pull requests.

use clap::Parser;

mod commands;
mod logging;
mod output;

use commands::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init();

    if let Err(e) = commands::label::run(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
