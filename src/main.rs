// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use script_strategist_server::{
    config::AppConfig,
    probe::{self, PROBE_TIMEOUT},
    server,
    state::AppState,
    telemetry,
};

/// AI Script Strategist backend
#[derive(Parser, Debug)]
#[command(name = "script-strategist", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Probe the local health endpoint; exit status 1 if unhealthy
    Healthcheck {
        /// Override the probed URL (defaults to http://127.0.0.1:$PORT/health)
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => match serve().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "Server terminated with an error");
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        },
        Command::Healthcheck { url } => healthcheck(url).await,
    }
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    println!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let dotenv = dotenvy::dotenv();
    telemetry::init();
    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }

    let config = AppConfig::from_env()?;
    let integrations = config.integrations();
    tracing::info!(
        debug = config.debug,
        database = integrations.database,
        auth = integrations.auth,
        payments = integrations.payments,
        ai_providers = ?integrations.ai_providers,
        cache = integrations.cache,
        "Starting up {}...",
        config.app_name
    );

    let addr = config.bind_addr();
    let state = AppState::new(config);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr} (docs at /docs)");

    server::run(listener, state, server::shutdown_signal()).await?;

    tracing::info!("Shutting down...");
    Ok(())
}

async fn healthcheck(url: Option<String>) -> ExitCode {
    let _ = dotenvy::dotenv();

    let url = match url {
        Some(url) => url,
        None => match AppConfig::from_env() {
            Ok(config) => probe::health_url(&config),
            Err(e) => {
                eprintln!("unhealthy: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    match probe::check(&url, PROBE_TIMEOUT).await {
        Ok(status) => {
            println!("healthy: {url} returned {status}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("unhealthy: {e}");
            ExitCode::FAILURE
        }
    }
}
