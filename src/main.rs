//! CLI entry point for the secret batcher.
//!
//! Provides subcommands for serving the batch-create endpoint over HTTP and
//! for loading a batch of secrets from a local JSON file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use secret_batcher::batch::DEFAULT_OPS_PER_SEC;
use secret_batcher::handler::{self, AppState};
use secret_batcher::store::{MemoryStore, SecretStore, SecretsManagerStore};
use std::ffi::OsStr;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "secret_batcher")]
#[command(about = "Batch-create secrets in AWS Secrets Manager", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the batch-create endpoint over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,

        /// Create operations allowed per second, per request
        #[arg(short, long, default_value_t = DEFAULT_OPS_PER_SEC)]
        rate: u32,

        /// Keep secrets in process memory instead of AWS (local testing)
        #[arg(long, default_value_t = false)]
        in_memory: bool,
    },
    /// Create a batch of secrets from a JSON file and print the results
    Load {
        /// Path to a JSON list of {name, username, password} objects
        #[arg(value_name = "FILE")]
        file: String,

        /// Create operations allowed per second
        #[arg(short, long, default_value_t = DEFAULT_OPS_PER_SEC)]
        rate: u32,

        /// Run against the in-memory store instead of AWS
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _log_guard = init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            rate,
            in_memory,
        } => {
            let store = build_store(in_memory).await;
            let state = Arc::new(AppState {
                store,
                ops_per_sec: rate,
            });

            let app = handler::router(state);
            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!(%addr, rate, in_memory, "secret_batcher listening");
            axum::serve(listener, app).await?;
        }
        Commands::Load {
            file,
            rate,
            dry_run,
        } => {
            let body = std::fs::read_to_string(&file)?;
            let store = build_store(dry_run).await;

            let encoded = handler::handle(store.as_ref(), rate, &body).await?;
            println!("{encoded}");
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/secret_batcher.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("secret_batcher.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    file_guard
}

/// Picks the storage backend: process memory for local runs, otherwise AWS
/// via the ambient configuration.
async fn build_store(in_memory: bool) -> Arc<dyn SecretStore> {
    if in_memory {
        Arc::new(MemoryStore::new())
    } else {
        let config = aws_config::load_from_env().await;
        Arc::new(SecretsManagerStore::new(&config))
    }
}
