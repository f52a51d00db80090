//! blobup - Command-line tool for the blob uploader endpoint
//!
//! Reads the selected files, posts them as one multipart request and prints
//! the server's answer. Exits non-zero when the upload did not succeed.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use blobup_client::UploaderClient;
use blobup_core::UploadHandler;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "blobup")]
#[command(author, version, about = "Upload files to the blob uploader endpoint")]
#[command(propagate_version = true)]
struct Cli {
    /// Server URL [default: http://localhost:7071]
    #[arg(short, long, env = "BLOBUP_SERVER")]
    server: Option<String>,

    /// Upload endpoint path [default: /api/blobuploader]
    #[arg(long, env = "BLOBUP_ENDPOINT")]
    endpoint: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "BLOBUP_CONFIG")]
    config: Option<PathBuf>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload one or more files in a single request
    Upload {
        /// Files to upload, sent in the given order
        files: Vec<PathBuf>,
    },

    /// Show the resolved configuration
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set up logging; upload failures are already rendered, so the library
    // stays quiet below error while the CLI's own warnings still show
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("error,blobup::config=warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Load config file
    let (config, config_source) = if let Some(config_path) = &cli.config {
        (Config::load_from(config_path)?, Some(config_path.clone()))
    } else {
        Config::load()
    };

    // Merge CLI args with config
    let merged = config.merge_with_args(
        cli.server.as_deref(),
        cli.endpoint.as_deref(),
        cli.output,
        cli.no_color,
    )?;
    debug!(
        server = %merged.uploader.base_url,
        endpoint = %merged.uploader.endpoint,
        "Configuration resolved"
    );

    // Create output context
    let ctx = OutputContext::new(merged.output, merged.no_color, cli.quiet);

    match &cli.command {
        Commands::Upload { files } => {
            let client = UploaderClient::new(merged.uploader.clone())
                .context("Failed to create uploader client")?;
            let handler = UploadHandler::from_transport(client);

            let outcome = commands::upload(&handler, files, &ctx).await?;
            return Ok(ExitCode::from(commands::exit_status(&outcome)));
        }

        Commands::ShowConfig => {
            commands::show_config(&merged, config_source.as_deref(), &ctx)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
