//! Simulation diagnostics
//!
//! Publishes body count, sub-steps per tick, total mechanical energy and
//! elapsed simulated time through `bevy::diagnostic`, so they show up in
//! `LogDiagnosticsPlugin` output alongside frame timings.
//!
//! Requires [`SimulationPlugin`](crate::plugins::simulation::SimulationPlugin).

use crate::plugins::simulation::FrameStats;
use crate::simulation::Simulation;
use crate::states::AppState;
use bevy::diagnostic::DEFAULT_MAX_HISTORY_LENGTH;
use bevy::diagnostic::Diagnostic;
use bevy::diagnostic::DiagnosticPath;
use bevy::diagnostic::Diagnostics;
use bevy::diagnostic::RegisterDiagnostic;
use bevy::prelude::*;
use core::time::Duration;

#[derive(Resource)]
pub struct SimulationDiagnosticsState {
    update_timer: Timer,
}

pub struct SimulationDiagnosticsPlugin {
    max_history_length: usize,
    smoothing_factor: f64,
    update_interval: Duration,
}

impl Default for SimulationDiagnosticsPlugin {
    fn default() -> Self {
        Self {
            max_history_length: DEFAULT_MAX_HISTORY_LENGTH,
            smoothing_factor: 0.0,
            update_interval: Duration::from_secs_f64(1_f64 / 60_f64),
        }
    }
}

impl SimulationDiagnosticsPlugin {
    pub const BODY_COUNT_PATH: DiagnosticPath = DiagnosticPath::const_new("simulation/bodies");
    pub const SUBSTEPS_PATH: DiagnosticPath = DiagnosticPath::const_new("simulation/substeps");
    pub const TOTAL_ENERGY_PATH: DiagnosticPath =
        DiagnosticPath::const_new("simulation/total_energy");
    pub const ELAPSED_PATH: DiagnosticPath = DiagnosticPath::const_new("simulation/elapsed");

    const DIAGNOSTIC_PATHS: &'static [DiagnosticPath] = &[
        Self::BODY_COUNT_PATH,
        Self::SUBSTEPS_PATH,
        Self::TOTAL_ENERGY_PATH,
        Self::ELAPSED_PATH,
    ];

    pub fn with_update_interval(mut self, update_interval: Duration) -> Self {
        self.update_interval = update_interval;
        self
    }

    fn register_diagnostics(&self, app: &mut App) {
        for path in Self::DIAGNOSTIC_PATHS {
            app.register_diagnostic(
                Diagnostic::new(path.clone())
                    .with_max_history_length(self.max_history_length)
                    .with_smoothing_factor(self.smoothing_factor),
            );
        }
    }

    fn update_timer_ticks(mut state: ResMut<SimulationDiagnosticsState>, time: Res<Time>) {
        state.update_timer.tick(time.delta());
    }

    fn update_simulation_diagnostics(
        simulation: Res<Simulation>,
        stats: Res<FrameStats>,
        mut diagnostics: Diagnostics,
        state: Res<SimulationDiagnosticsState>,
    ) {
        if state.update_timer.finished() {
            diagnostics.add_measurement(&Self::BODY_COUNT_PATH, || {
                simulation.universe().len() as f64
            });
            diagnostics.add_measurement(&Self::SUBSTEPS_PATH, || stats.substeps as f64);
            diagnostics.add_measurement(&Self::TOTAL_ENERGY_PATH, || simulation.total_energy());
            diagnostics.add_measurement(&Self::ELAPSED_PATH, || simulation.elapsed());
        }
    }
}

impl Plugin for SimulationDiagnosticsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimulationDiagnosticsState {
            update_timer: Timer::new(self.update_interval, TimerMode::Repeating),
        });

        self.register_diagnostics(app);

        app.add_systems(
            FixedPostUpdate,
            (
                Self::update_timer_ticks,
                Self::update_simulation_diagnostics.run_if(resource_exists::<Simulation>),
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );
    }
}
