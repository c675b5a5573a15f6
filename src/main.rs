//! dockerconf - Main entry point
//!
//! Loads parameter and fact files, runs the resolver and prints the
//! resulting descriptors as JSON.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use dockerconf::cli::{Cli, Commands};
use dockerconf::platform::PLATFORM_RULES;
use dockerconf::{apply_order, resolve, DockerParams, Facts};

/// Initialize the logger; RUST_LOG overrides the default `info` level
fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logger();

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    let result = match cli.command {
        Commands::Resolve { params, facts, ordered } => run_resolve(params.as_deref(), &facts, ordered),
        Commands::Validate { params } => run_validate(&params),
        Commands::Platforms => {
            print_platforms();
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn load_params(path: Option<&Path>) -> Result<DockerParams> {
    match path {
        Some(path) => {
            info!("Loading parameters from: {:?}", path);
            DockerParams::load_from_file(path)
        }
        None => {
            debug!("No parameters file, using defaults");
            Ok(DockerParams::default())
        }
    }
}

fn run_resolve(params_path: Option<&Path>, facts_path: &Path, ordered: bool) -> Result<()> {
    let params = load_params(params_path)?;
    info!("Loading facts from: {:?}", facts_path);
    let facts = Facts::load_from_file(facts_path)?;

    let resources = resolve(&params, &facts).context("Resolution failed")?;

    let resources = if ordered {
        let plan = apply_order(&resources).context("Could not order resources")?;
        debug!("{}", plan.summary());
        plan.steps
    } else {
        resources
    };

    let json = serde_json::to_string_pretty(&resources).context("Failed to serialize resources")?;
    println!("{}", json);
    Ok(())
}

fn run_validate(path: &Path) -> Result<()> {
    let params = load_params(Some(path))?;
    params.validate().context("Parameter validation failed")?;
    info!("Parameter validation successful");
    println!("✓ Parameters file is valid: {}", path.display());
    Ok(())
}

fn print_platforms() {
    println!("{:<10} {:<12} {:>9}  {:<11} {:<6} {}", "FAMILY", "OS", "MIN MAJOR", "PACKAGE", "REPO", "CONFIG");
    for rule in PLATFORM_RULES {
        println!(
            "{:<10} {:<12} {:>9}  {:<11} {:<6} {}",
            rule.family.to_string(),
            rule.distribution.unwrap_or("*"),
            rule.min_major,
            rule.package,
            rule.aux_repo.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()),
            rule.layout.service_config
        );
    }
}
