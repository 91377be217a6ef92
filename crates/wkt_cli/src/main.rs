//! WKT CLI - rehearse a template duplication run.
//!
//! Loads a project snapshot, runs the workout folder through the standard
//! pipeline, and prints the final run state as JSON on stdout. Log lines go
//! to stderr and to the run's log file.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use clap::Parser;
use tracing::info;

use wkt_core::config::{ConfigManager, ConfigSection};
use wkt_core::logging::{init_tracing, LogCallback, LogLevel, RunLogger};
use wkt_core::orchestrator::{run_workflow, RunRequest};
use wkt_core::project::MemoryProject;

#[derive(Parser, Debug)]
#[command(name = "wkt")]
#[command(about = "Duplicate a workout template sequence for a folder of media")]
#[command(version)]
struct Args {
    /// Workout folder to process
    #[arg(short, long)]
    folder: PathBuf,

    /// Project snapshot (JSON) the run is applied to
    #[arg(short, long)]
    project: PathBuf,

    /// Config file (created with defaults if missing)
    #[arg(short, long, env = "WKT_CONFIG", default_value = "wkt.toml")]
    config: PathBuf,

    /// Write the modified project back to the snapshot file
    #[arg(long)]
    save: bool,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ConfigManager::new(&args.config);
    config
        .load_or_create()
        .with_context(|| format!("loading config {}", args.config.display()))?;

    let mut log_config = config.settings().logging.to_log_config();
    if let Some(level) = args.log_level {
        log_config.level = level;
    }
    init_tracing(log_config.level);

    let request = RunRequest::from_folder(&args.folder)
        .with_context(|| format!("reading folder {}", args.folder.display()))?;
    info!(
        "Discovered {} file(s) in {}",
        request.files.len(),
        args.folder.display()
    );

    let snapshot = fs::read_to_string(&args.project)
        .with_context(|| format!("reading project {}", args.project.display()))?;
    let mut project = MemoryProject::from_json(&snapshot)
        .with_context(|| format!("parsing project {}", args.project.display()))?;

    config.settings_mut().paths.last_input_folder = args.folder.display().to_string();
    config
        .update_section(ConfigSection::Paths)
        .context("recording last input folder")?;

    let run_name = request
        .folder_name
        .clone()
        .unwrap_or_else(|| "run".to_string());
    let callback: LogCallback = Box::new(|line| eprintln!("{}", line));
    let logger = RunLogger::new(&run_name, config.logs_folder(), log_config, Some(callback))
        .with_context(|| format!("creating log in {}", config.logs_folder().display()))?;
    let logger = Arc::new(logger);

    let report = run_workflow(request, config.settings().clone(), &mut project, logger);

    println!("{}", serde_json::to_string_pretty(&report.state)?);

    if args.save {
        let json = project.to_json_pretty()?;
        fs::write(&args.project, json)
            .with_context(|| format!("writing project {}", args.project.display()))?;
        info!("Saved project to {}", args.project.display());
    }

    if let Err(e) = report.result {
        bail!(e);
    }
    Ok(())
}
