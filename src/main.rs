#![forbid(unsafe_code)]

//! `letterboard`: shared letter board server binary.
//!
//! Loads configuration, populates the first round, starts the round timer,
//! and serves the WebSocket and optional line transports until shutdown.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use letterboard::config::GlobalConfig;
use letterboard::round::timer::spawn_round_timer;
use letterboard::session::coordinator::Coordinator;
use letterboard::transport::{lines, ws};
use letterboard::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "letterboard", about = "Shared letter board server", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the HTTP port from the configuration.
    #[arg(long)]
    port: Option<u16>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("letterboard server bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let mut config = match args.config {
        Some(ref path) => GlobalConfig::load_from_path(path)?,
        None => GlobalConfig::default(),
    };
    if let Some(port) = args.port {
        config.http_port = port;
        config.validate()?;
    }
    info!(
        http = %config.http_addr(),
        round_seconds = config.round.round_seconds,
        break_seconds = config.round.break_seconds,
        "configuration loaded"
    );

    // ── Build shared board ──────────────────────────────
    let coordinator = Arc::new(Coordinator::from_config(&config));
    coordinator.start_round().await;

    let ct = CancellationToken::new();
    let timer_handle = spawn_round_timer(
        Arc::clone(&coordinator),
        config.round.tick_interval(),
        ct.clone(),
    );

    // ── Start transports ────────────────────────────────
    let http_listener = bind(config.http_addr()).await?;
    let http_ct = ct.clone();
    let http_coordinator = Arc::clone(&coordinator);
    let http_handle = tokio::spawn(async move {
        if let Err(err) = ws::serve_http(http_listener, http_coordinator, http_ct).await {
            error!(%err, "http transport failed");
        }
    });

    let lines_handle = match config.lines_addr() {
        Some(addr) => {
            let listener = bind(addr).await?;
            let lines_ct = ct.clone();
            let lines_coordinator = Arc::clone(&coordinator);
            Some(tokio::spawn(async move {
                if let Err(err) = lines::serve_lines(listener, lines_coordinator, lines_ct).await {
                    error!(%err, "line transport failed");
                }
            }))
        }
        None => None,
    };

    info!("letterboard ready");

    // ── Wait for shutdown signal ────────────────────────
    shutdown_signal().await;
    info!("shutdown signal received");
    ct.cancel();

    let _ = tokio::join!(http_handle, timer_handle);
    if let Some(handle) = lines_handle {
        let _ = handle.await;
    }
    info!("letterboard shut down");

    Ok(())
}

async fn bind(addr: std::net::SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::Transport(format!("failed to bind {addr}: {err}")))
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
