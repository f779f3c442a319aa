//! Command line interface for Spacelab

use clap::Parser;
use std::fmt;

use crate::config::SimulationConfig;
use crate::physics::integrators::IntegrationMethod;
use crate::physics::math::Scalar;
use crate::scenarios::Scenario;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// Command line overrides produced an unusable configuration
    InvalidOverride(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidOverride(msg) => write!(f, "Invalid option: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Spacelab - 2D Newtonian gravity sandbox
#[derive(Parser, Debug, Default)]
#[command(version = VERSION, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Scenario to load (overrides config file)
    #[arg(short, long, value_enum)]
    pub scenario: Option<Scenario>,

    /// Integration method (overrides config file)
    #[arg(short, long, value_enum)]
    pub integrator: Option<IntegrationMethod>,

    /// Initial time-scale multiplier, snapped to the nearest preset
    #[arg(short, long, value_name = "MULTIPLIER")]
    pub time_scale: Option<Scalar>,

    /// Ceiling on physics sub-steps per frame
    #[arg(short = 'm', long, value_name = "COUNT")]
    pub max_steps: Option<usize>,

    /// Stop after this many physics frames
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub frames: Option<u64>,

    /// Disable collision detection
    #[arg(long)]
    pub no_collisions: bool,

    /// Start paused
    #[arg(short = 'p', long)]
    pub paused: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available scenarios and exit
    #[arg(long)]
    pub list_scenarios: bool,

    /// Write the effective configuration to the user config file and exit
    #[arg(long)]
    pub save_config: bool,
}

/// Handles the --list-scenarios flag by printing available scenarios
pub fn handle_list_scenarios() {
    println!("Available scenarios:");
    for scenario in Scenario::ALL {
        println!("  - {:<18} {}", scenario.as_str(), scenario.title());
    }

    println!("\nIntegration methods:");
    for method in [
        IntegrationMethod::SingleStep,
        IntegrationMethod::MultiStep,
        IntegrationMethod::PatchedConic,
    ] {
        println!("  - {method}");
    }
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let config = if let Some(config_path) = &args.config {
        println!("Loading configuration from: {config_path}");
        SimulationConfig::load_from_path(config_path)
            .map_err(|e| CliError::ConfigLoad(e.to_string()))?
    } else {
        SimulationConfig::load_from_user_config()
    };

    apply_overrides(config, args)
}

/// Apply command-line overrides onto a loaded configuration
pub fn apply_overrides(
    mut config: SimulationConfig,
    args: &Args,
) -> Result<SimulationConfig, CliError> {
    if let Some(scenario) = args.scenario {
        println!("Using scenario: {scenario}");
        config.scenario.initial = scenario;
    }

    if let Some(method) = args.integrator {
        println!("Using integration method: {method}");
        config.physics.integration_method = method;
    }

    if let Some(time_scale) = args.time_scale {
        println!("Overriding time scale to: {time_scale}x");
        config.physics.time_scale = time_scale;
    }

    if let Some(max_steps) = args.max_steps {
        println!("Overriding max physics steps per frame to: {max_steps}");
        config.physics.max_physics_steps_per_frame = max_steps;
    }

    if args.no_collisions {
        config.physics.collision_detection = false;
    }

    if args.paused {
        config.scenario.start_paused = true;
    }

    config
        .validate()
        .map_err(|e| CliError::InvalidOverride(e.to_string()))?;

    Ok(config)
}
