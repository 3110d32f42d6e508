//! Paybook web server
//!
//! Run with: cargo run --bin paybook
//!
//! # Configuration
//!
//! Read from `--config`, or the first of `~/.config/paybook/config.toml`,
//! `/etc/paybook/config.toml` and `./config.toml`. Environment variables
//! override the file:
//! - `PAYBOOK_DATABASE`: SQLite file (default: database.db)
//! - `PAYBOOK_HOST`: Host to bind to (default: 127.0.0.1)
//! - `PAYBOOK_PORT`: Port to listen on (default: 5000)
//! - `PAYBOOK_LOG_LEVEL` / `RUST_LOG`: Log filter (default: info)
//! - `PAYBOOK_LOG_FORMAT`: `pretty` or `json`

use anyhow::Context;
use clap::{Parser, Subcommand};
use paybook::config::{generate_default_config, Config};
use paybook::storage::Store;
use paybook::web::{serve, AppState};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "paybook")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Employee attendance and payroll book")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web front end (default)
    Serve {
        /// Override the bind host
        #[arg(long)]
        host: Option<String>,
        /// Override the bind port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print a default config file
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (host, port) = match cli.command {
        Some(Commands::Config { output }) => return write_default_config(output),
        Some(Commands::Serve { host, port }) => (host, port),
        None => (None, None),
    };

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    paybook::logging::init(&config.logging)?;
    config.log_load();

    tracing::info!("Starting Paybook v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Database: {}", config.storage.database_path);

    let store = Store::open(&config.storage.database_path)
        .with_context(|| format!("opening database {}", config.storage.database_path))?;

    let state = AppState::new(store, config.server.clone());
    serve(state, &config.server).await?;

    tracing::info!("Paybook stopped");
    Ok(())
}

fn write_default_config(output: Option<PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
