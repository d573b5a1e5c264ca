#![forbid(unsafe_code)]

//! `drop-farmer` — concurrent session runner for the Blum drop game.
//!
//! Exchanges the credential embedded in a mini-app launch URL for a bearer
//! token, then plays the requested number of game sessions concurrently
//! and reports the aggregate result.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use drop_farmer::auth;
use drop_farmer::config::Config;
use drop_farmer::game::api::LiveGameApi;
use drop_farmer::game::driver::DriverSettings;
use drop_farmer::http::HttpClient;
use drop_farmer::orchestrator;
use drop_farmer::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "drop-farmer", about = "Concurrent session runner for the Blum drop game", version, long_about = None)]
struct Cli {
    /// Mini-app launch URL carrying the authentication fragment.
    url: String,

    /// Number of sessions to play; anything that is not a positive integer
    /// falls back to 1.
    sessions: Option<String>,

    /// Path to an optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;

    // Sessions are cooperative tasks; one thread is the whole scheduler.
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    let config = match args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::default(),
    };
    let count = orchestrator::resolve_session_count(args.sessions.as_deref());

    let payload = auth::extract_auth_from_url(&args.url)?;
    let http = HttpClient::new(&config.api)?;
    let token = auth::acquire_token(&http, &config, &payload).await?;

    let api = Arc::new(LiveGameApi::new(http, &config));
    let settings = DriverSettings {
        pacing: Duration::from_secs(config.game.pacing_seconds),
        score_min: config.game.score_min,
        score_max: config.game.score_max,
    };

    tokio::select! {
        summary = orchestrator::run_sessions(api, token, count, settings) => {
            info!(
                succeeded = summary.succeeded(),
                total = summary.total(),
                "run finished"
            );
        }
        () = shutdown_signal() => {
            // In-flight sessions are abandoned; nothing is awaited or
            // rolled back.
            warn!("interrupt received; exiting");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            tracing::error!(%err, "ctrl-c signal handler failed");
        }
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
