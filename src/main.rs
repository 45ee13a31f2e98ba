use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use csv_ingest::config::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    match csv_ingest::run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            ExitCode::from(1)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
