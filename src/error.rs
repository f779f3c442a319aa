//! Error types shared by the physics core and the host application

use crate::physics::integrators::IntegrationMethod;
use std::fmt;

/// Errors raised while advancing or editing a simulation
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The configured integration method is recognized but not implemented
    UnsupportedIntegration(IntegrationMethod),
    /// A configuration value is outside its accepted range
    InvalidConfig(String),
    /// A body was described with a non-physical state
    InvalidBody(String),
}

impl SimulationError {
    /// Configuration errors stop the simulation; nothing about the next tick
    /// would turn out differently.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SimulationError::UnsupportedIntegration(_) | SimulationError::InvalidConfig(_)
        )
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::UnsupportedIntegration(method) => {
                write!(f, "Unsupported integration method: {method} is not implemented")
            }
            SimulationError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            SimulationError::InvalidBody(msg) => write!(f, "Invalid body: {msg}"),
        }
    }
}

impl std::error::Error for SimulationError {}

/// Errors raised while loading or saving configuration files
#[derive(Debug)]
pub enum ConfigError {
    /// The layered configuration could not be read or deserialized
    Load(config::ConfigError),
    /// The configuration could not be rendered as TOML
    Serialize(toml::ser::Error),
    /// Writing the configuration file failed
    Io(std::io::Error),
    /// No platform configuration directory is available
    NoConfigDirectory,
    /// The configuration loaded but failed validation
    Invalid(SimulationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(e) => write!(f, "Failed to load configuration: {e}"),
            ConfigError::Serialize(e) => write!(f, "Failed to serialize configuration: {e}"),
            ConfigError::Io(e) => write!(f, "Failed to write configuration: {e}"),
            ConfigError::NoConfigDirectory => {
                write!(f, "Could not determine a configuration directory")
            }
            ConfigError::Invalid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Load(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            ConfigError::NoConfigDirectory => None,
            ConfigError::Invalid(e) => Some(e),
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        ConfigError::Load(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<SimulationError> for ConfigError {
    fn from(e: SimulationError) -> Self {
        ConfigError::Invalid(e)
    }
}
