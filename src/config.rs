use crate::error::{ConfigError, SimulationError};
use crate::physics::integrators::{DEFAULT_MAX_STEPS_PER_FRAME, IntegrationMethod};
use crate::physics::math::{GRAVITATIONAL_CONSTANT, Scalar};
use crate::physics::step::StepSettings;
use crate::scenarios::Scenario;
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Time-scale multipliers the user can step through
pub const TIME_SCALE_LADDER: [Scalar; 17] = [
    0.1, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0, 128.0, 256.0, 512.0, 1024.0, 2048.0,
    4096.0, 8192.0,
];

const CONFIG_FILE_NAME: &str = "config.toml";
const ENVIRONMENT_PREFIX: &str = "SPACELAB";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub scenario: ScenarioConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// km³·kg⁻¹·s⁻²
    pub gravitational_constant: Scalar,
    /// Nominal simulated seconds per physics step
    pub base_dt: Scalar,
    /// Initial time-scale multiplier; snapped to the nearest ladder rung
    pub time_scale: Scalar,
    /// Highest multiplier the user may select
    pub max_time_scale: Scalar,
    pub integration_method: IntegrationMethod,
    pub max_physics_steps_per_frame: usize,
    pub collision_detection: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            base_dt: 1.0,
            time_scale: 1.0,
            max_time_scale: 8192.0,
            integration_method: IntegrationMethod::MultiStep,
            max_physics_steps_per_frame: DEFAULT_MAX_STEPS_PER_FRAME,
            collision_detection: true,
        }
    }
}

impl PhysicsConfig {
    pub fn step_settings(&self) -> StepSettings {
        StepSettings {
            method: self.integration_method,
            gravitational_constant: self.gravitational_constant,
            max_steps_per_frame: self.max_physics_steps_per_frame,
            collision_detection: self.collision_detection,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub initial: Scenario,
    pub start_paused: bool,
    /// km/s of launch velocity per screen pixel of drag
    pub drag_velocity_scale: Scalar,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            initial: Scenario::EarthMoon,
            start_paused: false,
            drag_velocity_scale: 0.1,
        }
    }
}

impl SimulationConfig {
    /// Platform-specific location of the user's configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "spacelab", "spacelab")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Layer defaults, an optional TOML file and `SPACELAB_*` environment
    /// variables (e.g. `SPACELAB_PHYSICS__TIME_SCALE=64`), then validate
    pub fn load_layered(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        let config: Self = builder
            .add_source(
                config::Environment::with_prefix(ENVIRONMENT_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Load a specific file; a missing file yields the defaults
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_layered(Some(path.as_ref()))
    }

    /// Load the user's configuration, falling back to defaults on any error
    pub fn load_from_user_config() -> Self {
        let path = Self::user_config_path();
        if path.is_none() {
            warn!("No configuration directory available. Using defaults.");
        }

        match Self::load_layered(path.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn save_to_user_config(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::user_config_path().ok_or(ConfigError::NoConfigDirectory)?;
        self.save(&path)?;
        info!("Configuration saved to {}", path.display());
        Ok(path)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let physics = &self.physics;

        if !(physics.base_dt.is_finite() && physics.base_dt > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "physics.base_dt must be positive, got {}",
                physics.base_dt
            )));
        }
        if !(physics.gravitational_constant.is_finite() && physics.gravitational_constant >= 0.0)
        {
            return Err(SimulationError::InvalidConfig(format!(
                "physics.gravitational_constant must be non-negative, got {}",
                physics.gravitational_constant
            )));
        }
        if physics.max_physics_steps_per_frame == 0 {
            return Err(SimulationError::InvalidConfig(
                "physics.max_physics_steps_per_frame must be at least 1".into(),
            ));
        }
        if !(physics.time_scale.is_finite() && physics.time_scale > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "physics.time_scale must be positive, got {}",
                physics.time_scale
            )));
        }
        if !(physics.max_time_scale >= TIME_SCALE_LADDER[0]) {
            return Err(SimulationError::InvalidConfig(format!(
                "physics.max_time_scale must be at least {}, got {}",
                TIME_SCALE_LADDER[0], physics.max_time_scale
            )));
        }

        Ok(())
    }
}
