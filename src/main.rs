// file: src/main.rs
// description: commandline entry point running the pipeline for one catalog index
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use chrono::Local;
use clap::{ArgAction, Parser};
use repo_coordinator::utils::logging::init_logger;
use repo_coordinator::utils::telemetry::log_overall_duration;
use repo_coordinator::{Config, PipelineOrchestrator};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

#[derive(Parser)]
#[command(name = "repo_coordinator")]
#[command(version = "0.1.0")]
#[command(about = "Build one cataloged repository to LLVM IR and run the analysis tool on it", long_about = None)]
struct Cli {
    /// Position of the repository in the catalog
    #[arg(value_name = "INDEX", env = "REPO_INDEX")]
    index: usize,

    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml",
        env = "REPO_COORDINATOR_CONFIG"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, fallback) = if cli.config.exists() {
        let config =
            Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?;
        (config, None)
    } else {
        match Config::load(None) {
            Ok(config) => (config, None),
            Err(e) => (Config::default_config(), Some(e)),
        }
    };

    init_logger(cli.color, cli.verbose, Some(&config.paths.log_path()));

    if !cli.config.exists() {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
    }
    if let Some(e) = fallback {
        warn!("Falling back to built-in defaults: {}", e);
    }

    let started_at = Local::now();
    let start_time = Instant::now();

    info!("Repository coordinator");
    info!("WORK ROOT: {}", config.paths.work_root.display());
    info!("HOST PATH: {}", config.paths.host_path.display());
    info!("CATALOG: {}", config.paths.catalog_path().display());
    info!("RESULTS: {}", config.paths.result_path().display());
    info!("ANALYSIS TOOL: {}", config.paths.analysis_tool.display());

    let mut orchestrator = PipelineOrchestrator::new(config);
    let report = orchestrator
        .run(cli.index)
        .await
        .with_context(|| format!("Pipeline run for index {} failed", cli.index))?;

    report.print_summary();

    info!("Start time: {}", started_at.format(TIMESTAMP_FORMAT));
    info!("End time: {}", Local::now().format(TIMESTAMP_FORMAT));
    log_overall_duration(start_time.elapsed());

    let failed = report.failed_analyses();
    if failed > 0 {
        warn!(
            "{} of {} analysis runs failed",
            failed,
            report.analyses.len()
        );
    }

    Ok(())
}
