pub mod api;
pub mod app;
pub mod cli;
pub mod command;
pub mod config;
pub mod event;
pub mod language;
pub mod links;
pub mod ui;

use app::App;
use clap::Parser;
use cli::{Cli, CliCommand};
use config::load_config;
use ratatui_image::picker::Picker;

use crate::api::WikiClient;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Initialize tracing (logs to stderr if RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        // No subcommand or explicit `tui` → launch the interactive TUI.
        None | Some(CliCommand::Tui) => run_tui().await,
        // All other subcommands → non-interactive JSONL output.
        Some(cmd) => cli::run_command(cmd).await,
    }
}

/// Launch the interactive TUI.
async fn run_tui() -> color_eyre::Result<()> {
    let config = load_config();
    let client = WikiClient::new(&config)?;
    tracing::info!(base_url = client.base_url(), "client initialized");

    let terminal = ratatui::init();
    // Query graphics support after entering the alternate screen and before
    // the event reader starts consuming stdin.
    let picker = Picker::from_query_stdio().unwrap_or_else(|e| {
        tracing::warn!("image protocol detection failed, using half blocks: {e:?}");
        Picker::from_fontsize((8, 12))
    });

    let result = App::new(config, client, picker).run(terminal).await;
    ratatui::restore();
    result
}
