//! Multi-step policy
//!
//! Splits a frame into `round(total_dt / base_dt)` equal sub-steps, clamped
//! to `[1, max_steps_per_frame]`. The ceiling bounds per-frame cost at
//! extreme time scales (up to 8192×); past it each sub-step simply grows
//! and accuracy degrades instead of the frame stalling.

use super::{Integrator, check_step_limits, euler_pass};
use crate::error::SimulationError;
use crate::physics::body::Body;
use crate::physics::math::Scalar;

#[derive(Debug, Clone, Copy)]
pub struct MultiStep {
    base_dt: Scalar,
    max_steps_per_frame: usize,
}

impl MultiStep {
    pub fn new(base_dt: Scalar, max_steps_per_frame: usize) -> Result<Self, SimulationError> {
        check_step_limits(base_dt, max_steps_per_frame)?;

        Ok(Self {
            base_dt,
            max_steps_per_frame,
        })
    }

    pub fn max_steps_per_frame(&self) -> usize {
        self.max_steps_per_frame
    }

    /// Number of sub-steps a frame of `total_dt` is split into
    pub fn substeps_for(&self, total_dt: Scalar) -> usize {
        let wanted = self.wanted_substeps(total_dt);

        if wanted.is_nan() || wanted < 1.0 {
            return 1;
        }
        if self.is_clamped(total_dt) {
            return self.max_steps_per_frame;
        }
        wanted as usize
    }

    fn wanted_substeps(&self, total_dt: Scalar) -> Scalar {
        (total_dt / self.base_dt).round()
    }
}

impl Integrator for MultiStep {
    fn integrate(&self, bodies: &mut [Body], g: Scalar, total_dt: Scalar) -> usize {
        let steps = self.substeps_for(total_dt);
        let actual_dt = total_dt / steps as Scalar;

        for _ in 0..steps {
            euler_pass(bodies, g, actual_dt);
        }

        steps
    }

    fn is_clamped(&self, total_dt: Scalar) -> bool {
        self.wanted_substeps(total_dt) > self.max_steps_per_frame as Scalar
    }

    fn name(&self) -> &'static str {
        "multi_step"
    }

    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }
}
