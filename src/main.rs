use anyhow::{Context, Result};
use box_join::{pipeline, JoinError, MergeConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "box-join")]
#[command(about = "Join file details with their categories and technologies by BOX ID")]
struct Args {
    /// Directory holding the input exports (or set BOX_JOIN_DIR; default: current directory)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Detail table file name, relative to the directory
    #[arg(long)]
    details: Option<PathBuf>,

    /// Category table file name, relative to the directory
    #[arg(long)]
    categories: Option<PathBuf>,

    /// Technology table file name, relative to the directory
    #[arg(long)]
    technologies: Option<PathBuf>,

    /// Output file name, relative to the directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file overriding column names
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let base_dir = MergeConfig::resolve_base_dir(args.dir);
    let mut config = MergeConfig::in_dir(&base_dir)
        .with_schema_file(args.schema.as_deref())
        .context("Failed to load column schema")?;
    if let Some(name) = args.details {
        config.details_path = base_dir.join(name);
    }
    if let Some(name) = args.categories {
        config.categories_path = base_dir.join(name);
    }
    if let Some(name) = args.technologies {
        config.technologies_path = base_dir.join(name);
    }
    if let Some(name) = args.output {
        config.output_path = base_dir.join(name);
    }

    info!("Starting BOX ID merge in {}", base_dir.display());

    let summary = match pipeline::run(&config) {
        Ok(summary) => summary,
        Err(e @ JoinError::EmptyDetails { .. }) => {
            error!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("\n{}", summary);
    }
    info!("Merge complete");

    Ok(())
}
