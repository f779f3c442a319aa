//! Per-frame physics tick
//!
//! One call advances the universe through a frame's worth of simulated time
//! under the selected stepping policy, then resolves collisions exactly once.

use super::body::BodyId;
use super::collision::{ImpactMarker, resolve_collisions};
use super::integrators::{DEFAULT_MAX_STEPS_PER_FRAME, IntegrationMethod};
use super::math::{GRAVITATIONAL_CONSTANT, Scalar};
use super::universe::Universe;
use crate::error::SimulationError;

/// Physics knobs consumed by [`step`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSettings {
    pub method: IntegrationMethod,
    pub gravitational_constant: Scalar,
    pub max_steps_per_frame: usize,
    pub collision_detection: bool,
}

impl Default for StepSettings {
    fn default() -> Self {
        Self {
            method: IntegrationMethod::default(),
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            max_steps_per_frame: DEFAULT_MAX_STEPS_PER_FRAME,
            collision_detection: true,
        }
    }
}

impl StepSettings {
    pub fn with_method(mut self, method: IntegrationMethod) -> Self {
        self.method = method;
        self
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// One marker per destroyed body, in detection order
    pub impacts: Vec<ImpactMarker>,
    /// Ids of every body removed this tick
    pub removed: Vec<BodyId>,
    /// Gravity passes performed
    pub substeps: usize,
    /// The pass ceiling cut this frame short of its wanted sub-steps
    pub clamped: bool,
}

/// Advance `universe` by `total_dt` seconds
///
/// `base_dt` is the nominal sub-step size for multi-step integration. Fails
/// without touching the universe when the method is unsupported, or when
/// `base_dt` is not positive or the pass ceiling is zero, whatever the method.
pub fn step(
    universe: &mut Universe,
    total_dt: Scalar,
    base_dt: Scalar,
    settings: &StepSettings,
) -> Result<StepReport, SimulationError> {
    let integrator = settings
        .method
        .integrator(base_dt, settings.max_steps_per_frame)?;

    let clamped = integrator.is_clamped(total_dt);
    let substeps = integrator.integrate(
        universe.bodies_mut(),
        settings.gravitational_constant,
        total_dt,
    );

    if !settings.collision_detection {
        return Ok(StepReport {
            substeps,
            clamped,
            ..Default::default()
        });
    }

    let report = resolve_collisions(universe);

    Ok(StepReport {
        impacts: report.impacts().collect(),
        removed: report.removed().collect(),
        substeps,
        clamped,
    })
}
