//! Simulation plugin
//!
//! Owns the [`Simulation`] resource, advances it once per fixed tick while
//! the app is running and turns [`SimulationCommand`] events into session
//! edits.

use crate::prelude::*;

mod actions;
mod physics;

use actions::{
    handle_integration_method_event, handle_scenario_commands, handle_spawn_commands,
    handle_time_scale_commands, handle_toggle_pause_simulation_event,
};
use bevy::ecs::schedule::{LogLevel, ScheduleBuildSettings};
pub use physics::{FrameStats, advance_simulation, exit_with_error};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Commands,
    Advance,
}

#[derive(Default)]
pub struct SimulationPlugin {
    config: Option<SimulationConfig>,
}

impl SimulationPlugin {
    /// Load configuration from the user's config file when built
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self
            .config
            .clone()
            .unwrap_or_else(SimulationConfig::load_from_user_config);

        match toml::to_string_pretty(&config) {
            Ok(toml_string) => {
                debug!("=== Current Configuration (TOML) ===\n{}", toml_string);
                debug!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        match Simulation::new(&config) {
            Ok(simulation) => {
                app.insert_state(AppState::from_paused(simulation.is_paused()));
                app.insert_resource(simulation);
            }
            Err(e) => {
                error!("Cannot start simulation: {}", e);
                app.insert_state(AppState::Paused);
                app.add_systems(Startup, exit_with_error);
            }
        }

        app.init_resource::<FrameStats>();

        app.add_event::<SimulationCommand>();
        app.add_event::<BodyDestroyed>();

        app.edit_schedule(FixedUpdate, |schedule| {
            schedule.set_build_settings(ScheduleBuildSettings {
                ambiguity_detection: LogLevel::Warn,
                ..default()
            });
        });

        app.configure_sets(
            Update,
            SimulationSet::Commands.run_if(resource_exists::<Simulation>),
        );
        app.configure_sets(
            FixedUpdate,
            SimulationSet::Advance
                .run_if(resource_exists::<Simulation>)
                .run_if(in_state(AppState::Running)),
        );

        app.add_systems(FixedUpdate, advance_simulation.in_set(SimulationSet::Advance));
        app.add_systems(
            Update,
            (
                handle_scenario_commands,
                handle_toggle_pause_simulation_event,
                handle_time_scale_commands,
                handle_integration_method_event,
                handle_spawn_commands,
            )
                .chain()
                .in_set(SimulationSet::Commands),
        );
    }
}
