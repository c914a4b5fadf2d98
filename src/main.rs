//src/main.rs

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;

#[cfg(test)]
mod test_utils;

use crate::{cli::Cli, config::AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controla o nível; sem ele, "info".
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // --help e --version não dependem do ambiente
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    cli.run(config).await
}
