use std::process;

use benchcmp::cli::{CommandLineConfig, emit, init_logging, run};
use clap::Parser;

fn main() {
    let config = CommandLineConfig::parse();
    init_logging(&config);

    let outcome = match run(&config) {
        Ok(outcome) => outcome,
        Err(err) => {
            println!("Error: {err}");
            process::exit(1);
        }
    };

    if let Err(err) = emit(&config, &outcome.report) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
    if outcome.failed {
        process::exit(1);
    }
}
