mod cli;
mod report;

use clap::Parser;

fn main() {
    // Setup logging
    tracing_subscriber::fmt::init();

    let args = cli::Cli::parse();
    if let Err(e) = cli::run(&args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
