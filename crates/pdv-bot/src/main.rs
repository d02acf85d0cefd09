//! pdv-ops maintenance bot
//!
//! Long-polls Telegram and runs maintenance actions on fleet hosts over SSH.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pdv_bot::channel::telegram::{BotApi, TelegramChannel};
use pdv_bot::{supervise, BotState, RestartPolicy};
use pdv_core::config::{self, BotConfig};

#[derive(Parser)]
#[command(name = "pdv-bot")]
#[command(about = "pdv-ops fleet maintenance bot")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Telegram bot token (overrides config)
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Authorized Telegram user IDs, comma separated (overrides config)
    #[arg(long, env = "AUTH_USER_ID", value_delimiter = ',')]
    authorized_users: Vec<i64>,

    /// SSH username (overrides config)
    #[arg(long, env = "SSH_USER")]
    ssh_user: Option<String>,

    /// Run in foreground with verbose output
    #[arg(short, long)]
    foreground: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.foreground { "debug" } else { &args.log_level };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("pdv-bot starting...");
    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {:?}", path);
    }

    let config = load_config(&args)?;
    config.validate().context("Invalid configuration")?;

    let fleet = config.fleet.fleet()?;
    tracing::info!(
        "Serving {} operators for hosts {} as '{}'",
        config.access.authorized_users.len(),
        fleet.address_range(),
        config.ssh.username
    );

    let poll_timeout = config.telegram.poll_timeout;
    let api = Arc::new(BotApi::new(&config.telegram).context("Failed to create Bot API client")?);
    let policy = RestartPolicy::from_config(&config.supervisor);
    let state = BotState::new(config)?;
    let channel = TelegramChannel::new(api, Arc::clone(state.machine()), poll_timeout);

    // Create cancellation token for graceful shutdown
    let cancel = CancellationToken::new();
    spawn_signal_handler(cancel.clone());

    let restarts = supervise(policy, &cancel, || channel.run(cancel.clone())).await;

    tracing::info!("pdv-bot shutdown complete ({} restarts)", restarts);
    Ok(())
}

/// Config file (explicit, default path or defaults), then CLI/env overrides
fn load_config(args: &Args) -> Result<BotConfig> {
    let mut config: BotConfig = if let Some(config_path) = &args.config {
        config::load_config(config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        let default_path = config::default_config_path();
        if default_path.exists() {
            config::load_config(&default_path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {:?}: {}", default_path, e);
                BotConfig::default()
            })
        } else {
            tracing::info!("Using default configuration");
            BotConfig::default()
        }
    };

    if let Some(token) = &args.token {
        config.telegram.token = token.clone();
    }
    if !args.authorized_users.is_empty() {
        config.access.authorized_users = args.authorized_users.clone();
    }
    if let Some(user) = &args.ssh_user {
        config.ssh.username = user.clone();
    }

    Ok(config)
}

/// Cancel on Ctrl+C or SIGTERM
fn spawn_signal_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::warn!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                tracing::info!("Received Ctrl+C, initiating shutdown...");
            }
            _ = terminate => {
                tracing::info!("Received SIGTERM, initiating shutdown...");
            }
        }

        cancel.cancel();
    });
}
