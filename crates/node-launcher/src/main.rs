//! # Node Launcher
//!
//! Validates the compiled-in chain parameters and selects the active
//! network. Exits nonzero when the constants are wrong (70) or when the
//! requested network is inconsistent (64).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use node_launcher::config::NodeConfig;
use node_launcher::logging::init_tracing;
use node_launcher::startup::{bootstrap, LaunchError};

/// Select and validate chain parameters for this node
#[derive(Parser, Debug)]
#[command(name = "node-launcher")]
#[command(about = "Validate network constants and select the active network")]
struct Args {
    /// Use the public test network
    #[arg(long)]
    testnet: bool,

    /// Use the local regression test network
    #[arg(long)]
    regtest: bool,

    /// Network by name (main, test, regtest)
    #[arg(long, value_name = "NAME")]
    network: Option<String>,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Print the active parameters as JSON
    #[arg(long)]
    print_params: bool,
}

fn load_config(args: &Args) -> Result<NodeConfig, LaunchError> {
    let mut config = match &args.config {
        Some(path) => NodeConfig::load(path)?,
        None => NodeConfig::default(),
    };
    config.apply_env()?;

    config.network.testnet |= args.testnet;
    config.network.regtest |= args.regtest;
    if let Some(name) = &args.network {
        config.network.name = Some(name.clone());
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    Ok(config)
}

fn run(args: &Args, config: &NodeConfig) -> Result<()> {
    let params = bootstrap(&config.network)?;

    if args.print_params {
        let json = serde_json::to_string_pretty(&params.summary())
            .context("failed to serialize chain parameters")?;
        println!("{json}");
    }

    info!(
        network = %params.network(),
        genesis = %params.genesis_hash(),
        "Startup complete"
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_tracing("info");
            error!(error = %e, "Invalid configuration");
            eprintln!("Error: {e}");
            return ExitCode::from(e.exit_code());
        }
    };
    init_tracing(&config.logging.level);

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<LaunchError>()
                .map(LaunchError::exit_code)
                .unwrap_or(1);
            error!(error = %format!("{e:#}"), "Node launch aborted");
            eprintln!("Error: {e:#}");
            ExitCode::from(code)
        }
    }
}
