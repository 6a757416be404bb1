use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use todo_server::{
    config::{load_dotenv, Config, DEFAULT_APP_ENV},
    setup::{initialize_app, run_migrations},
    telemetry::{
        init_telemetry, log_config_validation, log_shutdown_info, log_startup_info, report_error,
    },
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "todo-server")]
#[command(about = "Todo item HTTP service")]
#[command(version)]
struct Cli {
    /// Application environment; selects config/<env>.toml and .env.<env>
    #[arg(short, long, env = "APP_ENV", default_value = DEFAULT_APP_ENV)]
    env: String,

    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<String>,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Listen address override
    #[arg(long)]
    listen_addr: Option<String>,

    /// Port override
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level override
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(&cli.env, cli.config.as_deref())?;

    // CLI flags win over every other source
    if let Some(ref database_url) = cli.database_url {
        config.database.url = database_url.clone();
    }

    if let Some(ref listen_addr) = cli.listen_addr {
        config.server.listen_addr = listen_addr.clone();
    }

    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if let Some(ref log_level) = cli.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv(&cli.env);

    let config = load_config(&cli).context("Failed to load configuration")?;

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;
    info!(app_env = %cli.env, "Configuration loaded");

    log_config_validation(&config);
    config.validate().context("Invalid configuration")?;

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config).await,
        Command::Migrate => run_migrations(&config).await,
    };

    if let Err(ref e) = result {
        report_error(e, "todo-server");
    }
    result
}

async fn serve(config: &Config) -> Result<()> {
    log_startup_info(config);

    let server = initialize_app(config)
        .await
        .context("Failed to initialize application")?;

    let addr = config.server_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    server
        .serve_with_listener(listener, shutdown_signal())
        .await
        .context("Server error")?;

    log_shutdown_info();
    Ok(())
}

/// Resolves on SIGINT or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
