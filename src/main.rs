//! # Job Engine - Entry Point
//! src/main.rs
//!
//! Construye un job a partir de la línea de comandos, le asocia un
//! comando básico y lo ejecuta sobre los streams del proceso.

use job_engine::commands;
use job_engine::config::Config;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = Config::new();

    // Los logs van a stderr: stdout es la salida del job
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid configuration");
        std::process::exit(2);
    }
    config.log_summary();

    if let Err(e) = commands::execute(&config, io::stdin(), io::stdout(), io::stderr()) {
        tracing::error!(error = %e, "job failed");
        std::process::exit(1);
    }
}
