use clap::{Parser, Subcommand};
use env_logger::Env;
use herb_attributions::{
    extract_attributions, fetch_images, rename_images, AppConfig, AttributionError, ExtractOptions,
};
use log::{error, info};
use std::path::PathBuf;

/// Build, fetch and rename the image attributions of the recipe catalog.
#[derive(Debug, Parser)]
#[command(name = "herb-attributions", version)]
#[command(about = "Image attribution tools for the apothecary recipe catalog", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults to ./attributions.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse the attribution document and write the JSON, markdown and CSV outputs.
    Extract {
        /// The hand-written attribution document.
        #[arg(long)]
        source: Option<PathBuf>,
        /// Directory for the generated files.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Download every image listed in the manifest.
    Fetch {
        /// Manifest CSV (defaults to the one written by `extract`).
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Directory the images are saved to.
        #[arg(long)]
        dest: Option<PathBuf>,
    },

    /// Rename downloaded images to their short canonical names.
    Rename {
        /// Directory holding the downloaded images.
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> Result<(), AttributionError> {
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Extract { source, output_dir } => {
            let mut options = ExtractOptions::from_config(&config);
            if let Some(source) = source {
                options.source = source;
            }
            if let Some(output_dir) = output_dir {
                options.output_dir = output_dir;
            }

            let report = extract_attributions(&options)?;
            info!("Recipes: {}", report.recipes);
            info!("Images: {}", report.images);
        }
        Command::Fetch { manifest, dest } => {
            let manifest = manifest.unwrap_or_else(|| {
                config.outputs.manifest_path(&config.paths.output_dir)
            });
            let dest = dest.unwrap_or_else(|| config.paths.images_dir.clone());
            fetch_images(&manifest, &dest, &config.download)?;
        }
        Command::Rename { dir } => {
            let dir = dir.unwrap_or_else(|| config.paths.images_dir.clone());
            let report = rename_images(&dir)?;
            info!("Renamed {} files ({} skipped)", report.renamed, report.skipped);
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        error!("{}", e);
        std::process::exit(1);
    }
}
