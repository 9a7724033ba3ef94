use std::process;

use clap::Parser;
use tps_decoder::cli::{self, Args};

fn main() {
    let args = Args::parse();

    if let Err(error) = cli::run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}
