//! userq CLI - Command-line client for the userq daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;
use tabled::{Table, Tabled};

const DEFAULT_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "userq")]
#[command(about = "userq dispatch service CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Daemon base URL
    #[arg(long, env = "USERQ_URL", default_value = DEFAULT_URL)]
    url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch per-user processing onto the user's queue
    Dispatch {
        /// User ID (omit to send no user_id at all)
        user_id: Option<String>,
    },

    /// Show daemon health
    Health,
}

#[derive(Deserialize, Tabled)]
struct HealthRow {
    status: String,
    version: String,
    queue_backend: String,
    uptime_seconds: u64,
}

fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

async fn dispatch(base: &str, user_id: Option<&str>) -> Result<String> {
    let client = reqwest::Client::new();
    let mut request = client.post(endpoint(base, "/dispatch"));
    if let Some(id) = user_id {
        request = request.form(&[("user_id", id)]);
    }

    let response = request
        .send()
        .await
        .context("Failed to connect to daemon")?;

    let status = response.status();
    let body = response.text().await.context("Failed to read response")?;

    if !status.is_success() {
        anyhow::bail!("Dispatch failed ({}): {}", status, body);
    }

    Ok(body)
}

async fn health(base: &str) -> Result<HealthRow> {
    reqwest::get(endpoint(base, "/health"))
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Dispatch { user_id } => {
            let ack = dispatch(&cli.url, user_id.as_deref()).await?;
            println!("{} {}", "✓".green().bold(), ack);
        }

        Commands::Health => match health(&cli.url).await {
            Ok(row) => {
                let up = row.status == "UP";
                println!("  {} {}", "URL:".bold(), cli.url);
                println!(
                    "  {} {}",
                    "Status:".bold(),
                    if up { "ONLINE".green() } else { "DEGRADED".yellow() }
                );
                println!();
                println!("{}", Table::new(vec![row]));
            }
            Err(e) => {
                println!("  {} {}", "Status:".bold(), "ERROR".red());
                return Err(e);
            }
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    run(Cli::parse()).await
}
