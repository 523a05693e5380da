//! `pdfpane` CLI - drive the document pipeline from a terminal

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use pdfpane::{Config, Platform};

#[derive(Parser)]
#[command(name = "pdfpane")]
#[command(about = "Fetch, cache and plan the display of PDF documents")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/pdfpane/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a remote PDF as a data: URI and show how it would render
    Read {
        /// Document URL (default: document_url from config)
        url: Option<String>,

        /// Host platform (default: this build's platform)
        #[arg(short, long)]
        platform: Option<Platform>,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Select a local PDF and show how it would render
    Open {
        /// PDF to open (prompts when omitted; an empty answer cancels)
        path: Option<PathBuf>,

        #[arg(short, long)]
        platform: Option<Platform>,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Download a PDF into the cache as <FILENAME>.pdf
    Download {
        url: String,

        /// Cache file name, without extension
        filename: String,
    },

    /// Print the render plan for a URL, file URI or data: URI
    Plan {
        reference: String,

        #[arg(short, long)]
        platform: Option<Platform>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Read { url, platform, format } => {
            if let Some(url) = url {
                config.document_url = url;
            }
            config.platform = platform.or(config.platform);
            cmd::cmd_read(&config, format).await?;
        }
        Commands::Open { path, platform, format } => {
            config.platform = platform.or(config.platform);
            cmd::cmd_open(&config, path, format).await?;
        }
        Commands::Download { url, filename } => {
            cmd::cmd_download(&config, &url, &filename).await?;
        }
        Commands::Plan { reference, platform } => {
            config.platform = platform.or(config.platform);
            cmd::cmd_plan(&config, &reference);
        }
    }

    Ok(())
}
