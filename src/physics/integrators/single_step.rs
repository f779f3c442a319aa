//! Single-step policy
//!
//! The whole frame is one semi-implicit Euler pass of `total_dt`. Cheap, but
//! once `total_dt` stops being small next to the orbital periods involved the
//! orbits drift in energy and pair-order artifacts show up. That is the
//! accepted price of this mode.

use super::{Integrator, euler_pass};
use crate::physics::body::Body;
use crate::physics::math::Scalar;

#[derive(Debug, Clone, Copy, Default)]
pub struct SingleStep;

impl Integrator for SingleStep {
    fn integrate(&self, bodies: &mut [Body], g: Scalar, total_dt: Scalar) -> usize {
        euler_pass(bodies, g, total_dt);
        1
    }

    fn name(&self) -> &'static str {
        "single_step"
    }

    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }
}
