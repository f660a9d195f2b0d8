mod commands;
mod output;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use newsapi::{Client, ClientConfig, DEFAULT_BASE_URL};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "newsapi")]
#[command(about = "Search news articles and top headlines from NewsAPI")]
struct Cli {
    /// Output format: table, json, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// NewsAPI key
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    api_key: String,

    /// Override the API host (e.g. for a local mock)
    #[arg(long, env = "NEWSAPI_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds; unset leaves the transport default
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search all indexed articles
    Everything(commands::everything::EverythingArgs),
    /// List top headlines
    Headlines(commands::headlines::HeadlinesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("newsapi=info".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = OutputFormat::from_arg(&cli.output);

    let config = ClientConfig {
        base_url: cli
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        timeout: cli.timeout_secs.map(Duration::from_secs),
        ..ClientConfig::default()
    };
    let client = Client::with_config(cli.api_key.as_str(), config);

    client
        .scope(|client| async move {
            match &cli.command {
                Commands::Everything(args) => {
                    commands::everything::run(args, &client, &format).await
                }
                Commands::Headlines(args) => {
                    commands::headlines::run(args, &client, &format).await
                }
            }
        })
        .await
}
