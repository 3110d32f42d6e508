//! Paybook desk
//!
//! Interactive console front end over the same database as the web server.
//!
//! Run with: cargo run --bin paybook-desk -- --view dashboard

use anyhow::Context;
use clap::Parser;
use paybook::config::Config;
use paybook::console::{Console, View};
use paybook::storage::Store;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "paybook-desk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mark attendance, edit salaries and view the dashboard from a terminal")]
struct Cli {
    /// Config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite file, overrides the config
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Open a single view instead of the menu
    #[arg(short, long, value_enum)]
    view: Option<View>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config.storage.database_path = database.to_string_lossy().into_owned();
    }

    paybook::logging::init(&config.logging)?;
    config.log_load();

    let store = Store::open(&config.storage.database_path)
        .with_context(|| format!("opening database {}", config.storage.database_path))?;

    let stdin = std::io::stdin();
    let mut console = Console::new(store, stdin.lock(), std::io::stdout());

    match cli.view {
        Some(view) => console.show(view)?,
        None => console.run()?,
    }

    Ok(())
}
