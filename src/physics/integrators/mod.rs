//! Stepping policies for advancing the universe through one frame
//!
//! Every policy is built on the same semi-implicit Euler pass: gravity
//! updates all velocities, then every body drifts along its new velocity.
//! Policies differ only in how a frame's simulated time is split into
//! passes.

use crate::error::SimulationError;
use crate::physics::body::Body;
use crate::physics::gravity::apply_gravity;
use crate::physics::math::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod multi_step;
pub mod single_step;

pub use multi_step::MultiStep;
pub use single_step::SingleStep;

/// Default ceiling on gravity passes per frame for [`MultiStep`]
pub const DEFAULT_MAX_STEPS_PER_FRAME: usize = 100;

/// Base trait for all stepping policies
pub trait Integrator: Send + Sync {
    /// Advance positions and velocities of `bodies` by `total_dt` seconds
    ///
    /// Returns the number of gravity passes performed.
    fn integrate(&self, bodies: &mut [Body], g: Scalar, total_dt: Scalar) -> usize;

    /// Whether a frame of `total_dt` hits this policy's pass ceiling
    fn is_clamped(&self, _total_dt: Scalar) -> bool {
        false
    }

    /// Canonical configuration name of this policy
    fn name(&self) -> &'static str;

    fn clone_box(&self) -> Box<dyn Integrator>;
}

/// Reject a base step or pass ceiling no policy can run with
pub fn check_step_limits(base_dt: Scalar, max_steps_per_frame: usize) -> Result<(), SimulationError> {
    if !(base_dt.is_finite() && base_dt > 0.0) {
        return Err(SimulationError::InvalidConfig(format!(
            "base_dt must be positive, got {base_dt}"
        )));
    }
    if max_steps_per_frame == 0 {
        return Err(SimulationError::InvalidConfig(
            "max_physics_steps_per_frame must be at least 1".into(),
        ));
    }
    Ok(())
}

/// One semi-implicit Euler pass: kick every velocity, then drift every position
#[inline]
pub fn euler_pass(bodies: &mut [Body], g: Scalar, dt: Scalar) {
    apply_gravity(bodies, g, dt);

    for body in bodies.iter_mut() {
        body.advance(dt);
    }
}

/// Integration method selected in configuration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum IntegrationMethod {
    /// One large step per frame; fast, unstable at high time scales
    SingleStep,
    /// Frame time split into base-sized sub-steps, capped per frame
    #[default]
    MultiStep,
    /// Recognized but not implemented; selecting it fails the next tick
    PatchedConic,
}

impl IntegrationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationMethod::SingleStep => "single_step",
            IntegrationMethod::MultiStep => "multi_step",
            IntegrationMethod::PatchedConic => "patched_conic",
        }
    }

    /// Build the stepping policy for this method
    ///
    /// The step limits are checked for every method, not only the one that
    /// sub-steps.
    pub fn integrator(
        &self,
        base_dt: Scalar,
        max_steps_per_frame: usize,
    ) -> Result<Box<dyn Integrator>, SimulationError> {
        if *self == IntegrationMethod::PatchedConic {
            return Err(SimulationError::UnsupportedIntegration(*self));
        }
        check_step_limits(base_dt, max_steps_per_frame)?;

        match self {
            IntegrationMethod::SingleStep => Ok(Box::new(SingleStep)),
            IntegrationMethod::MultiStep => Ok(Box::new(MultiStep::new(
                base_dt,
                max_steps_per_frame,
            )?)),
            IntegrationMethod::PatchedConic => {
                Err(SimulationError::UnsupportedIntegration(*self))
            }
        }
    }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        method: IntegrationMethod,
    }

    #[test]
    fn test_method_names_match_configuration_values() {
        for (method, name) in [
            (IntegrationMethod::SingleStep, "single_step"),
            (IntegrationMethod::MultiStep, "multi_step"),
            (IntegrationMethod::PatchedConic, "patched_conic"),
        ] {
            let rendered = toml::to_string(&Wrapper { method }).unwrap();
            assert_eq!(rendered.trim(), format!("method = \"{name}\""));
            assert_eq!(method.to_string(), name);
        }
    }

    #[test]
    fn test_unknown_method_fails_to_parse() {
        let parsed: Result<Wrapper, _> = toml::from_str("method = \"runge_kutta\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_patched_conic_is_unsupported() {
        let result = IntegrationMethod::PatchedConic.integrator(1.0, 100);

        assert!(matches!(
            result,
            Err(SimulationError::UnsupportedIntegration(
                IntegrationMethod::PatchedConic
            ))
        ));
    }

    #[test]
    fn test_policies_report_their_names() {
        let single = IntegrationMethod::SingleStep.integrator(1.0, 100).unwrap();
        let multi = IntegrationMethod::MultiStep.integrator(1.0, 100).unwrap();

        assert_eq!(single.name(), "single_step");
        assert_eq!(multi.name(), "multi_step");
        assert_eq!(multi.clone_box().name(), "multi_step");
    }
}
