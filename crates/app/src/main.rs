//! `ShopEase` maintenance CLI

use std::process::ExitCode;

use clap::Parser;

mod cli;

#[tokio::main]
pub async fn main() -> ExitCode {
    if let Err(missing) = dotenvy::dotenv()
        && !missing.not_found()
    {
        eprintln!("ignoring unreadable .env file: {missing}");
    }

    match cli::Cli::parse().run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
