pub mod cli;
pub mod config;
pub mod logging;
pub mod view;

pub use cli::{Cli, Command, PromptGate, Session, execute};
pub use config::{Config, ConfigError, LogFormat, LogLevel};
pub use logging::init_tracing;

use clap::Parser;
use std::process;

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Main entry point for the application
pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(output) => {
            print!("{output}");
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
