//! Fixed-tick physics system

use crate::prelude::*;

/// Counters from the most recent ticks, read by the diagnostics plugin
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Ticks advanced since the scenario was loaded
    pub ticks: u64,
    /// Gravity passes in the latest tick
    pub substeps: usize,
    /// Bodies destroyed since the scenario was loaded
    pub destroyed: usize,
}

pub fn advance_simulation(
    mut simulation: ResMut<Simulation>,
    mut stats: ResMut<FrameStats>,
    mut destroyed: EventWriter<BodyDestroyed>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: EventWriter<AppExit>,
) {
    match simulation.tick() {
        Ok(report) => {
            stats.ticks += 1;
            stats.substeps = report.substeps;
            stats.destroyed += report.removed.len();

            for (body, marker) in report.removed.iter().zip(&report.impacts) {
                destroyed.write(BodyDestroyed {
                    body: *body,
                    impact: marker.position,
                });
            }
        }
        Err(e) if e.is_fatal() => {
            error!("{}", e);
            simulation.set_paused(true);
            next_state.set(AppState::Paused);
            exit.write(AppExit::error());
        }
        Err(e) => warn!("{}", e),
    }
}

pub fn exit_with_error(mut exit: EventWriter<AppExit>) {
    exit.write(AppExit::error());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::BodySpec;
    use crate::physics::integrators::IntegrationMethod;
    use crate::physics::math::Vector;
    use crate::plugins::simulation::SimulationPlugin;
    use crate::scenarios::Scenario;
    use crate::test_utils::create_test_app;

    fn app_with(config: SimulationConfig) -> App {
        let mut app = create_test_app();
        app.add_plugins(SimulationPlugin::with_config(config));
        app.update();
        app
    }

    #[test]
    fn test_fixed_tick_advances_simulation() {
        let mut app = app_with(SimulationConfig::default());

        app.world_mut().run_schedule(FixedUpdate);

        let simulation = app.world().resource::<Simulation>();
        assert_eq!(simulation.elapsed(), 1.0);
        assert_eq!(app.world().resource::<FrameStats>().ticks, 1);
        assert_eq!(app.world().resource::<FrameStats>().substeps, 1);
    }

    #[test]
    fn test_start_paused_skips_fixed_tick() {
        let mut config = SimulationConfig::default();
        config.scenario.start_paused = true;
        let mut app = app_with(config);

        app.world_mut().run_schedule(FixedUpdate);

        assert_eq!(app.world().resource::<Simulation>().elapsed(), 0.0);
        assert_eq!(app.world().resource::<FrameStats>().ticks, 0);
    }

    #[test]
    fn test_collision_emits_body_destroyed() {
        let mut config = SimulationConfig::default();
        config.scenario.initial = Scenario::Empty;
        let mut app = app_with(config);
        {
            let mut simulation = app.world_mut().resource_mut::<Simulation>();
            simulation
                .spawn(BodySpec::new("Planet", 1e24, 100.0).primary())
                .unwrap();
            simulation
                .spawn(BodySpec::new("Probe", 1000.0, 0.1).at(Vector::new(50.0, 0.0)))
                .unwrap();
        }

        app.world_mut().run_schedule(FixedUpdate);

        let events = app.world().resource::<Events<BodyDestroyed>>();
        let destroyed: Vec<_> = events.get_cursor().read(events).copied().collect();
        assert_eq!(destroyed.len(), 1);
        assert!((destroyed[0].impact.length() - 100.0).abs() < 1e-6);
        assert_eq!(app.world().resource::<Simulation>().impacts().len(), 1);
        assert_eq!(app.world().resource::<FrameStats>().destroyed, 1);
    }

    #[test]
    fn test_patched_conic_requests_error_exit() {
        let mut config = SimulationConfig::default();
        config.physics.integration_method = IntegrationMethod::PatchedConic;
        let mut app = app_with(config);
        let before = app.world().resource::<Simulation>().universe().bodies().to_vec();

        app.world_mut().run_schedule(FixedUpdate);

        assert!(app.should_exit().is_some_and(|exit| exit.is_error()));
        let simulation = app.world().resource::<Simulation>();
        assert!(simulation.is_paused());
        assert_eq!(simulation.universe().bodies(), before.as_slice());
    }

    #[test]
    fn test_invalid_config_exits_on_startup() {
        let mut config = SimulationConfig::default();
        config.physics.base_dt = -1.0;

        let app = app_with(config);

        assert!(!app.world().contains_resource::<Simulation>());
        assert!(app.should_exit().is_some_and(|exit| exit.is_error()));
    }
}
