//! SLAcer command line front end

use anyhow::Result;
use clap::Parser;
use slacer::{init_logging, LoadOutcome, Session, SettingsManager, BUILD_DATE, VERSION};
use std::path::PathBuf;
use tracing::{info, warn};

/// Load STL meshes against persistent SLA slicer settings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// STL files or http(s)/file URLs, loaded in order
    #[arg(value_name = "SOURCE")]
    sources: Vec<String>,

    /// Settings snapshot to use (.json or .toml)
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Leave the settings file untouched on exit
    #[arg(long)]
    no_persist: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    info!("SLAcer {} (built {})", VERSION, BUILD_DATE);

    let settings_path = match cli.settings {
        Some(path) => path,
        None => {
            SettingsManager::ensure_config_dir()?;
            SettingsManager::config_file_path()?
        }
    };

    let mut session = Session::open(settings_path)?;
    for (name, outcome) in session.load_sources(&cli.sources).await {
        match outcome {
            LoadOutcome::Installed(info) => info!(
                "{}: {} faces, {} cm³, {} g",
                name, info.faces, info.volume_cm3, info.weight_g
            ),
            LoadOutcome::Failed(err) => warn!("{}: {}", name, err),
            LoadOutcome::Discarded { seq } => info!("{}: superseded (#{})", name, seq),
        }
    }

    for line in session.panel_summary() {
        info!("{}", line);
    }

    if !cli.no_persist {
        session.save()?;
    }
    Ok(())
}
