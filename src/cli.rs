use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, eyre};

use crate::api::WikiClient;
use crate::api::types::SearchResult;
use crate::config::load_config;
use crate::language::{LanguageCode, resolve};
use crate::links;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "wikisearch", about = "TUI and CLI for wiki article summaries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Launch the interactive TUI (default)
    Tui,
    /// Look up one article summary (JSONL)
    Search {
        /// Article title, sent as typed
        query: String,
        /// Language label: Indonesia or Inggris (anything else means English)
        #[arg(long, short)]
        lang: Option<String>,
        /// Open the article in the default browser
        #[arg(long)]
        open: bool,
        /// Download the thumbnail and write it to PATH (format from extension)
        #[arg(long, value_name = "PATH")]
        save_thumbnail: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

/// Build the self-contained JSON line printed for a result.
fn result_line(query: &str, lang: LanguageCode, result: &SearchResult) -> serde_json::Value {
    serde_json::json!({
        "query": query,
        "lang": lang,
        "result": result,
    })
}

/// Run one search and render it as a JSON line. Failures collapse to the
/// user-facing message.
async fn search_line(
    client: &WikiClient,
    code: LanguageCode,
    query: &str,
) -> eyre::Result<(SearchResult, String)> {
    let result = client.search(code, query).await.map_err(|e| {
        tracing::warn!(%query, kind = ?e.kind(), "search failed: {e}");
        eyre!(e.user_message())
    })?;
    let line = serde_json::to_string(&result_line(query, code, &result))?;
    Ok((result, line))
}

async fn save_thumbnail(client: &WikiClient, result: &SearchResult, path: &Path) -> eyre::Result<()> {
    let Some(url) = result.thumbnail_url.as_deref() else {
        eprintln!("No thumbnail for {}", result.title);
        return Ok(());
    };
    let img = client
        .fetch_thumbnail(url)
        .await
        .map_err(|e| eyre!("thumbnail unavailable: {e}"))?;
    img.save(path)?;
    eprintln!("Thumbnail saved to {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

pub async fn run_command(cmd: CliCommand) -> eyre::Result<()> {
    let config = load_config();
    let client = WikiClient::new(&config)?;

    match cmd {
        CliCommand::Tui => unreachable!("tui is handled in main"),

        CliCommand::Search {
            query,
            lang,
            open,
            save_thumbnail: thumbnail_path,
        } => {
            let code = lang
                .as_deref()
                .map(resolve)
                .unwrap_or_else(|| config.default_language.code());

            let (result, line) = search_line(&client, code, &query).await?;
            println!("{line}");

            if let Some(path) = thumbnail_path {
                save_thumbnail(&client, &result, &path).await?;
            }

            if open {
                let url = result
                    .content_url
                    .as_deref()
                    .ok_or_else(|| eyre!("no article link for {}", result.title))?;
                links::open_in_browser(url)?;
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
