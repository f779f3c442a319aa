//! Interactive simulation session
//!
//! [`Simulation`] wraps a [`Universe`] with everything a host needs to drive
//! it frame by frame: the time-scale ladder, pause state, elapsed simulated
//! time, accumulated impact markers and the body-spawning helpers.

use crate::config::{PhysicsConfig, SimulationConfig, TIME_SCALE_LADDER};
use crate::error::SimulationError;
use crate::physics::body::{BodyColor, BodyId, BodySpec};
use crate::physics::collision::ImpactMarker;
use crate::physics::integrators::IntegrationMethod;
use crate::physics::math::{Scalar, Vector};
use crate::physics::step::{StepReport, step};
use crate::physics::universe::Universe;
use crate::scenarios::{Scenario, spec_from_template, template_by_name};
use bevy::prelude::*;

pub const SATELLITE_MASS: Scalar = 1000.0;
pub const SATELLITE_RADIUS: Scalar = 0.1;

/// Used when a custom body's mass is not given
pub const DEFAULT_CUSTOM_MASS: Scalar = 1e20;
/// Used when a custom body's radius is not given
pub const DEFAULT_CUSTOM_RADIUS: Scalar = 100.0;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

#[derive(Resource, Debug, Clone)]
pub struct Simulation {
    universe: Universe,
    impacts: Vec<ImpactMarker>,
    physics: PhysicsConfig,
    drag_velocity_scale: Scalar,
    scenario: Scenario,
    time_scale_index: usize,
    elapsed: Scalar,
    paused: bool,
    satellites_created: u32,
    /// Whether the last tick ran into the sub-step ceiling
    step_clamped: bool,
}

impl Simulation {
    pub fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut simulation = Self {
            universe: Universe::new(),
            impacts: Vec::new(),
            physics: config.physics.clone(),
            drag_velocity_scale: config.scenario.drag_velocity_scale,
            scenario: config.scenario.initial,
            time_scale_index: 0,
            elapsed: 0.0,
            paused: config.scenario.start_paused,
            satellites_created: 0,
            step_clamped: false,
        };
        simulation.time_scale_index =
            nearest_rung(config.physics.time_scale).min(simulation.max_time_scale_index());
        simulation.load_scenario(config.scenario.initial)?;

        Ok(simulation)
    }

    /// Replace the world with a fresh copy of `scenario`
    ///
    /// Markers, elapsed time and the satellite counter are reset; pause state
    /// and time scale are kept.
    pub fn load_scenario(&mut self, scenario: Scenario) -> Result<(), SimulationError> {
        self.universe = Universe::from_specs(scenario.bodies())?;
        self.scenario = scenario;
        self.impacts.clear();
        self.elapsed = 0.0;
        self.satellites_created = scenario.initial_satellite_count();

        info!(
            "Loaded {} with {} bodies",
            scenario.title(),
            self.universe.len()
        );
        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), SimulationError> {
        self.load_scenario(self.scenario)
    }

    /// Advance one frame
    ///
    /// A paused session does nothing. On error the world is left exactly as
    /// it was and no time elapses.
    pub fn tick(&mut self) -> Result<StepReport, SimulationError> {
        if self.paused {
            return Ok(StepReport::default());
        }

        let total_dt = self.frame_dt();
        let report = step(
            &mut self.universe,
            total_dt,
            self.physics.base_dt,
            &self.physics.step_settings(),
        )?;

        self.elapsed += total_dt;
        self.impacts.extend(report.impacts.iter().copied());
        self.note_clamping(report.clamped);

        Ok(report)
    }

    /// Log when frames start or stop hitting the sub-step ceiling
    ///
    /// Returns whether the clamp state changed.
    fn note_clamping(&mut self, clamped: bool) -> bool {
        if clamped == self.step_clamped {
            return false;
        }
        self.step_clamped = clamped;

        if clamped {
            debug!(
                "Sub-steps clamped to {} per frame at {}x",
                self.physics.max_physics_steps_per_frame,
                self.time_scale()
            );
        } else {
            debug!("Sub-steps back under the per-frame ceiling");
        }
        true
    }

    /// Simulated seconds covered by one frame
    pub fn frame_dt(&self) -> Scalar {
        self.physics.base_dt * self.time_scale()
    }

    pub fn time_scale(&self) -> Scalar {
        TIME_SCALE_LADDER[self.time_scale_index]
    }

    pub fn speed_up(&mut self) -> Scalar {
        if self.time_scale_index < self.max_time_scale_index() {
            self.time_scale_index += 1;
        }
        self.time_scale()
    }

    pub fn slow_down(&mut self) -> Scalar {
        self.time_scale_index = self.time_scale_index.saturating_sub(1);
        self.time_scale()
    }

    fn max_time_scale_index(&self) -> usize {
        TIME_SCALE_LADDER
            .iter()
            .rposition(|&scale| scale <= self.physics.max_time_scale)
            .unwrap_or(0)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn set_integration_method(&mut self, method: IntegrationMethod) {
        info!("Physics method changed to: {}", method);
        self.physics.integration_method = method;
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn universe_mut(&mut self) -> &mut Universe {
        &mut self.universe
    }

    pub fn impacts(&self) -> &[ImpactMarker] {
        &self.impacts
    }

    pub fn clear_impacts(&mut self) {
        self.impacts.clear();
    }

    /// Simulated seconds since the scenario was loaded
    pub fn elapsed(&self) -> Scalar {
        self.elapsed
    }

    pub fn total_energy(&self) -> Scalar {
        self.universe.total_energy(self.physics.gravitational_constant)
    }

    /// Convert a screen-space drag (pixels, y down) into a world velocity
    pub fn drag_velocity(&self, drag: Vector) -> Vector {
        Vector::new(drag.x, -drag.y) * self.drag_velocity_scale
    }

    /// Drop a stationary satellite at `position`
    pub fn spawn_satellite_at(&mut self, position: Vector) -> Result<BodyId, SimulationError> {
        self.spawn_satellite(position, Vector::ZERO)
    }

    /// Launch a satellite from `position` with a velocity taken from a drag
    pub fn spawn_satellite_from_drag(
        &mut self,
        position: Vector,
        drag: Vector,
    ) -> Result<BodyId, SimulationError> {
        self.spawn_satellite(position, self.drag_velocity(drag))
    }

    fn spawn_satellite(
        &mut self,
        position: Vector,
        velocity: Vector,
    ) -> Result<BodyId, SimulationError> {
        let name = format!("Satellite-{}", self.satellites_created + 1);
        let spec = BodySpec::new(name, SATELLITE_MASS, SATELLITE_RADIUS)
            .at(position)
            .moving(velocity)
            .with_color(BodyColor::CYAN);

        let id = self.spawn(spec)?;
        self.satellites_created += 1;
        Ok(id)
    }

    /// Spawn a body launched by a drag
    ///
    /// A name matching a predefined body (e.g. "jupiter") takes that body's
    /// mass, radius and color; anything else uses `mass` and `radius`.
    pub fn spawn_custom_body(
        &mut self,
        name: &str,
        mass: Scalar,
        radius: Scalar,
        position: Vector,
        drag: Vector,
    ) -> Result<BodyId, SimulationError> {
        let velocity = self.drag_velocity(drag);

        let spec = match template_by_name(name) {
            Some(template) => spec_from_template(&template, position, velocity),
            None => BodySpec::new(name.trim(), mass, radius)
                .at(position)
                .moving(velocity)
                .with_color(BodyColor::CUSTOM),
        };

        self.spawn(spec)
    }

    pub fn spawn(&mut self, spec: BodySpec) -> Result<BodyId, SimulationError> {
        let speed = spec.velocity.length();
        let name = spec.name.clone();
        let id = self.universe.spawn(spec)?;

        info!("Created {} {} with speed {:.2} km/s", name, id, speed);
        Ok(id)
    }
}

/// Index of the ladder rung closest to `scale`
fn nearest_rung(scale: Scalar) -> usize {
    TIME_SCALE_LADDER
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - scale).abs().total_cmp(&(*b - scale).abs()))
        .map(|(index, _)| index)
        .unwrap_or(0)
}

/// Render elapsed simulated time using its three largest units
///
/// Fractional seconds are dropped. A year is 365 days.
pub fn format_elapsed(seconds: Scalar) -> String {
    let total = seconds as u64;

    let years = total / SECONDS_PER_YEAR;
    let days = total % SECONDS_PER_YEAR / SECONDS_PER_DAY;
    let hours = total % SECONDS_PER_DAY / SECONDS_PER_HOUR;
    let minutes = total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE;
    let secs = total % SECONDS_PER_MINUTE;

    if years > 0 {
        format!("{years}y {days}d {hours}h")
    } else if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
