#![allow(non_snake_case)]

mod cli;

use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use vetAgenda::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => match AppConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        Err(_) => AppConfig::default(),
    };

    if let Err(e) = cli::cli(config).await {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
