//! Accuracy tests for the stepping policies
//!
//! Checks orbit closure against the analytical circular orbit and how
//! closely single-step and multi-step integration agree.

use spacelab::config::SimulationConfig;
use spacelab::error::SimulationError;
use spacelab::physics::body::BodySpec;
use spacelab::physics::integrators::IntegrationMethod;
use spacelab::physics::math::{GRAVITATIONAL_CONSTANT, Scalar, Vector, circular_orbit_speed};
use spacelab::physics::step::{StepSettings, step};
use spacelab::physics::universe::Universe;
use spacelab::scenarios::Scenario;
use spacelab::simulation::Simulation;

const PI: Scalar = std::f64::consts::PI;
const EARTH_MASS: Scalar = 5.972e24;
const EARTH_RADIUS: Scalar = 6371.0;

/// Satellite in a circular orbit around a fixed-ish Earth
fn circular_orbit(radius: Scalar) -> (Universe, Scalar) {
    let speed = circular_orbit_speed(GRAVITATIONAL_CONSTANT, EARTH_MASS, radius);
    let period = 2.0 * PI * radius / speed;

    let universe = Universe::from_specs([
        BodySpec::new("Earth", EARTH_MASS, EARTH_RADIUS).primary(),
        BodySpec::new("Satellite", 1000.0, 0.1)
            .at(Vector::new(radius, 0.0))
            .moving(Vector::new(0.0, speed)),
    ])
    .unwrap();

    (universe, period)
}

fn run(universe: &mut Universe, frames: usize, total_dt: Scalar, settings: &StepSettings) {
    for _ in 0..frames {
        step(universe, total_dt, 1.0, settings).unwrap();
    }
}

#[test]
fn test_multi_step_orbit_closes_after_one_period() {
    let radius = 6771.0;
    let (mut universe, period) = circular_orbit(radius);
    let start = universe.bodies()[1].clone();
    let settings = StepSettings::default().with_method(IntegrationMethod::MultiStep);

    // 1x time scale: one base_dt per frame
    run(&mut universe, period.round() as usize, 1.0, &settings);

    assert_eq!(universe.len(), 2, "satellite should not have crashed");
    let end = &universe.bodies()[1];
    let position_error = (end.position - start.position).length();
    let velocity_error = (end.velocity - start.velocity).length();

    assert!(
        position_error < 0.005 * radius,
        "position drifted {position_error} km over one period"
    );
    assert!(
        velocity_error < 0.005 * start.velocity.length(),
        "velocity drifted {velocity_error} km/s over one period"
    );
}

#[test]
fn test_orbit_radius_stays_bounded_over_many_periods() {
    let radius = 42_164.0;
    let (mut universe, period) = circular_orbit(radius);
    let settings = StepSettings::default();

    // Ten periods at 64x
    let frames = (10.0 * period / 64.0).round() as usize;
    for _ in 0..frames {
        step(&mut universe, 64.0, 1.0, &settings).unwrap();
        let r = universe.bodies()[1].distance_to(&universe.bodies()[0]);
        assert!((r - radius).abs() < 0.01 * radius, "radius wandered to {r}");
    }
}

#[test]
fn test_single_and_multi_step_agree_at_small_time_scales() {
    for time_scale in [0.1, 0.25, 0.5, 1.0] {
        let (mut single, _) = circular_orbit(6771.0);
        let (mut multi, _) = circular_orbit(6771.0);

        run(
            &mut single,
            2000,
            time_scale,
            &StepSettings::default().with_method(IntegrationMethod::SingleStep),
        );
        run(
            &mut multi,
            2000,
            time_scale,
            &StepSettings::default().with_method(IntegrationMethod::MultiStep),
        );

        for (a, b) in single.iter().zip(multi.iter()) {
            assert!(
                (a.position - b.position).length() < 1e-6,
                "{} diverged at {time_scale}x",
                a.name
            );
            assert!((a.velocity - b.velocity).length() < 1e-9);
        }
    }
}

#[test]
fn test_finer_substeps_stay_close_to_single_step_at_one_x() {
    let (mut single, _) = circular_orbit(6771.0);
    let (mut multi, _) = circular_orbit(6771.0);

    for _ in 0..600 {
        step(
            &mut single,
            1.0,
            1.0,
            &StepSettings::default().with_method(IntegrationMethod::SingleStep),
        )
        .unwrap();
        // base_dt of 0.25 s: four passes per frame
        let report = step(&mut multi, 1.0, 0.25, &StepSettings::default()).unwrap();
        assert_eq!(report.substeps, 4);
    }

    let difference = (single.bodies()[1].position - multi.bodies()[1].position).length();
    assert!(difference < 10.0, "paths separated by {difference} km");
}

#[test]
fn test_large_time_scales_still_run() {
    // Divergence is allowed here; only the step budget is checked
    let (mut single, _) = circular_orbit(384_400.0);
    let (mut multi, _) = circular_orbit(384_400.0);

    let single_report = step(
        &mut single,
        1024.0,
        1.0,
        &StepSettings::default().with_method(IntegrationMethod::SingleStep),
    )
    .unwrap();
    let multi_report = step(&mut multi, 8192.0, 1.0, &StepSettings::default()).unwrap();

    assert_eq!(single_report.substeps, 1);
    assert_eq!(multi_report.substeps, 100);
}

#[test]
fn test_patched_conic_fails_on_first_tick() {
    let config: SimulationConfig = toml::from_str(
        r#"
        [physics]
        integration_method = "patched_conic"
        "#,
    )
    .unwrap();
    let mut simulation = Simulation::new(&config).unwrap();

    let error = simulation.tick().unwrap_err();

    assert_eq!(
        error,
        SimulationError::UnsupportedIntegration(IntegrationMethod::PatchedConic)
    );
    assert!(error.is_fatal());
    assert_eq!(simulation.elapsed(), 0.0);
}

#[test]
fn test_every_scenario_runs_at_high_speed() {
    for scenario in Scenario::ALL {
        let mut config = SimulationConfig::default();
        config.scenario.initial = scenario;
        config.physics.time_scale = 64.0;
        let mut simulation = Simulation::new(&config).unwrap();

        for _ in 0..100 {
            simulation.tick().unwrap();
        }

        assert_eq!(simulation.elapsed(), 6400.0, "{scenario}");
    }
}
