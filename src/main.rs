use bevy::app::ScheduleRunnerPlugin;
use bevy::diagnostic::{DiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::log::{Level, LogPlugin};
use bevy::state::app::StatesPlugin;
use clap::Parser;
use core::time::Duration;
use spacelab::cli::{Args, handle_list_scenarios, load_and_apply_config};
use spacelab::plugins::simulation::{FrameStats, SimulationPlugin};
use spacelab::plugins::simulation_diagnostics::SimulationDiagnosticsPlugin;
use spacelab::prelude::*;
use spacelab::simulation::format_elapsed;
use std::process::ExitCode;

const FRAMES_PER_SECOND: f64 = 60.0;

/// Stop after this many fixed ticks
#[derive(Resource, Deref, Debug, Clone, Copy)]
struct FrameLimit(u64);

fn main() -> ExitCode {
    let args = Args::parse();

    if args.list_scenarios {
        handle_list_scenarios();
        return ExitCode::SUCCESS;
    }

    let config = match load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if args.save_config {
        return match config.save_to_user_config() {
            Ok(path) => {
                println!("Configuration saved to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    let frame = Duration::from_secs_f64(1.0 / FRAMES_PER_SECOND);
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame)),
        LogPlugin {
            level: if args.verbose {
                Level::DEBUG
            } else {
                Level::INFO
            },
            ..default()
        },
        StatesPlugin,
        DiagnosticsPlugin,
        SimulationPlugin::with_config(config),
        SimulationDiagnosticsPlugin::default(),
    ));

    if args.verbose {
        app.add_plugins(LogDiagnosticsPlugin::default());
    }

    // One physics tick per display frame
    app.insert_resource(Time::<Fixed>::from_hz(FRAMES_PER_SECOND));

    if let Some(frames) = args.frames {
        app.insert_resource(FrameLimit(frames));
        app.add_systems(FixedPostUpdate, stop_after_frame_limit);
    }

    app.add_systems(Update, log_destroyed_bodies);

    match app.run() {
        AppExit::Success => ExitCode::SUCCESS,
        AppExit::Error(code) => ExitCode::from(code.get()),
    }
}

fn stop_after_frame_limit(
    limit: Res<FrameLimit>,
    stats: Res<FrameStats>,
    simulation: Option<Res<Simulation>>,
    mut exit: EventWriter<AppExit>,
) {
    if stats.ticks < **limit {
        return;
    }

    if let Some(simulation) = simulation {
        info!(
            "Stopping after {} frames: {} bodies, {} impacts, {} elapsed, energy {:.6e}",
            stats.ticks,
            simulation.universe().len(),
            simulation.impacts().len(),
            format_elapsed(simulation.elapsed()),
            simulation.total_energy()
        );
    }
    exit.write(AppExit::Success);
}

fn log_destroyed_bodies(mut destroyed: EventReader<BodyDestroyed>) {
    for event in destroyed.read() {
        debug!(
            "Body {} destroyed, impact at ({:.1}, {:.1}) km",
            event.body, event.impact.x, event.impact.y
        );
    }
}
