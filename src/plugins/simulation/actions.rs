//! Action handlers for simulation commands

use super::physics::FrameStats;
use crate::prelude::*;

pub fn handle_scenario_commands(
    mut commands_reader: EventReader<SimulationCommand>,
    mut simulation: ResMut<Simulation>,
    mut stats: ResMut<FrameStats>,
    mut exit: EventWriter<AppExit>,
) {
    for command in commands_reader.read() {
        let result = match command {
            SimulationCommand::Restart => simulation.restart(),
            SimulationCommand::SwitchScenario(scenario) => simulation.load_scenario(*scenario),
            SimulationCommand::ClearImpacts => {
                simulation.clear_impacts();
                continue;
            }
            _ => continue,
        };

        match result {
            Ok(()) => *stats = FrameStats::default(),
            Err(e) => {
                error!("Failed to load scenario: {}", e);
                exit.write(AppExit::error());
            }
        }
    }
}

pub fn handle_toggle_pause_simulation_event(
    mut commands_reader: EventReader<SimulationCommand>,
    mut simulation: ResMut<Simulation>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for command in commands_reader.read() {
        if !matches!(command, SimulationCommand::TogglePause) {
            continue;
        }
        let paused = simulation.toggle_pause();
        next_state.set(AppState::from_paused(paused));
    }
}

pub fn handle_time_scale_commands(
    mut commands_reader: EventReader<SimulationCommand>,
    mut simulation: ResMut<Simulation>,
) {
    for command in commands_reader.read() {
        let scale = match command {
            SimulationCommand::SpeedUp => simulation.speed_up(),
            SimulationCommand::SlowDown => simulation.slow_down(),
            _ => continue,
        };
        info!("Time scale: {}x", scale);
    }
}

pub fn handle_integration_method_event(
    mut commands_reader: EventReader<SimulationCommand>,
    mut simulation: ResMut<Simulation>,
) {
    for command in commands_reader.read() {
        if let SimulationCommand::SetIntegrationMethod(method) = command {
            simulation.set_integration_method(*method);
        }
    }
}

pub fn handle_spawn_commands(
    mut commands_reader: EventReader<SimulationCommand>,
    mut simulation: ResMut<Simulation>,
) {
    for command in commands_reader.read() {
        let result = match command {
            SimulationCommand::SpawnAt(position) => simulation.spawn_satellite_at(*position),
            SimulationCommand::SpawnFromDrag { position, drag } => {
                simulation.spawn_satellite_from_drag(*position, *drag)
            }
            SimulationCommand::SpawnCustom {
                name,
                mass,
                radius,
                position,
                drag,
            } => simulation.spawn_custom_body(name, *mass, *radius, *position, *drag),
            _ => continue,
        };

        if let Err(e) = result {
            warn!("Body creation cancelled: {}", e);
        }
    }
}
