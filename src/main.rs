use clap::Parser;
use colored::*;
use std::process;
use tradingview_csv::cli::{self, Args};

fn main() {
    let args = Args::parse();
    cli::setup_logging(&args);

    if let Err(error) = cli::run(&args) {
        eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
        process::exit(1);
    }
}
