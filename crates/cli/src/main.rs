use anyhow::Result;
use clap::Parser;
use color_eyre::config::HookBuilder;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod handlers;

/// s3put - upload build artifacts to S3-compatible object storage
#[derive(Parser, Debug)]
#[command(name = "s3put")]
#[command(version = "0.1.0")]
#[command(
    about = "Upload files matching glob selections to an object-storage bucket",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the upload job described by the manifest
    Run {
        /// Manifest path
        #[arg(short, long, default_value = "s3put.toml", env = "S3PUT_MANIFEST")]
        manifest: PathBuf,
    },

    /// Load and validate the manifest without uploading anything
    Check {
        /// Manifest path
        #[arg(short, long, default_value = "s3put.toml", env = "S3PUT_MANIFEST")]
        manifest: PathBuf,
    },

    /// Show every upload the job would perform, without network activity
    Plan {
        /// Manifest path
        #[arg(short, long, default_value = "s3put.toml", env = "S3PUT_MANIFEST")]
        manifest: PathBuf,
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    if let Err(e) = HookBuilder::default().install() {
        eprintln!("Warning: Failed to install error handler: {}", e);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    match cli.command {
        Commands::Run { manifest } => handlers::handle_run(&manifest).await,
        Commands::Check { manifest } => handlers::handle_check(&manifest).await,
        Commands::Plan { manifest, output } => handlers::handle_plan(&manifest, &output).await,
    }
}
