//! Pairwise Newtonian gravity
//!
//! Direct O(N²) summation over every ordered pair. The target scale is tens
//! of bodies, so no tree or softening is used; an exactly coincident pair
//! simply contributes no force.

use super::body::{Body, BodyId};
use super::math::{Scalar, Vector};
use std::collections::BTreeMap;

/// Force exerted on `body` by `other`, pointing from `body` toward `other`
#[inline]
pub fn pairwise_force(body: &Body, other: &Body, g: Scalar) -> Vector {
    let offset = other.position - body.position;
    let distance = offset.length();

    if distance == 0.0 {
        return Vector::ZERO;
    }

    let magnitude = g * body.mass * other.mass / (distance * distance);
    offset * (magnitude / distance)
}

/// Net gravitational force on every body, index-aligned with `bodies`
pub fn accumulate_forces(bodies: &[Body], g: Scalar) -> Vec<Vector> {
    bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            bodies
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, other)| pairwise_force(body, other, g))
                .sum::<Vector>()
        })
        .collect()
}

/// Gravitational acceleration of every body, keyed by id
pub fn compute_accelerations(bodies: &[Body], g: Scalar) -> BTreeMap<BodyId, Vector> {
    accumulate_forces(bodies, g)
        .into_iter()
        .zip(bodies)
        .map(|(force, body)| (body.id, force / body.mass))
        .collect()
}

/// Velocity half of a semi-implicit Euler step: v(t+dt) = v(t) + a(t) * dt
///
/// Forces are gathered for all bodies before any velocity changes, so the
/// result does not depend on iteration order. Positions are left untouched.
pub fn apply_gravity(bodies: &mut [Body], g: Scalar, dt: Scalar) {
    let forces = accumulate_forces(bodies, g);

    for (body, force) in bodies.iter_mut().zip(forces) {
        body.velocity += force / body.mass * dt;
    }
}
