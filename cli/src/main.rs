//! eshost - run JavaScript on many engines and compare the results

use std::process::ExitCode;

use clap::Parser;

use eshost_cli::cli::Cli;
use eshost_cli::logging;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
