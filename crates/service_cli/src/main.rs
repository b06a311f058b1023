//! aosdiff - One AOS diffusion step over a raw volume file
//!
//! This is the host entry point for the AOS diffusion kernel.
//!
//! # Commands
//!
//! - `aosdiff diffuse -i <raw> -d D0,D1,D2 -t <type> --delta-t <dt> -o <raw>` - Run one step
//! - `aosdiff check` - Report supported element types and effective configuration
//!
//! # Architecture
//!
//! As the service layer, this crate owns file I/O, configuration and
//! logging setup; the kernel crates stay free of all three.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use service_cli::commands::{self, diffuse::DiffuseArgs};
use service_cli::config::{build_config, CliArgs};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// AOS linear diffusion for 3D volumes
#[derive(Parser)]
#[command(name = "aosdiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Solve lines in parallel (true/false)
    #[arg(long, global = true)]
    parallel: Option<bool>,

    /// Minimum number of lines in a pass before solving in parallel
    #[arg(long, global = true)]
    parallel_threshold: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one diffusion step over a raw little-endian volume
    Diffuse {
        /// Path to the raw input volume
        #[arg(short, long)]
        input: PathBuf,

        /// Path of the f64 output volume
        #[arg(short, long)]
        output: PathBuf,

        /// Dimensions as D0,D1,D2 (D0 varies fastest)
        #[arg(short, long, value_parser = commands::diffuse::parse_dims)]
        dims: [usize; 3],

        /// Input element type (int8, uint8, int16, uint16, int32, uint32, single, double)
        #[arg(short = 't', long, default_value = "uint8")]
        element_type: String,

        /// Time increment
        #[arg(long, allow_hyphen_values = true)]
        delta_t: f64,
    },

    /// Check system configuration and supported element types
    Check,
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        CliArgs {
            config_file: cli.config.clone(),
            log_level: cli.log_level.clone(),
            verbose: cli.verbose,
            parallel: cli.parallel,
            parallel_threshold: cli.parallel_threshold,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs::from(&cli)).context("failed to load configuration")?;

    init_tracing(config.log_level.as_filter_str());

    info!("aosdiff v{}", service_cli::VERSION);
    info!(
        log_level = %config.log_level,
        parallel = config.kernel.parallel(),
        parallel_threshold = config.kernel.parallel_threshold(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Diffuse {
            input,
            output,
            dims,
            element_type,
            delta_t,
        } => {
            let args = DiffuseArgs {
                input,
                output,
                dims,
                element_type,
                delta_t,
            };
            let summary = commands::diffuse::run(&config, &args)
                .with_context(|| format!("diffusion of {} failed", args.input.display()))?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Check => {
            let report = commands::check::run(&config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
