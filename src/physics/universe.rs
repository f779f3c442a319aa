//! The ordered body collection a simulation owns

use super::body::{Body, BodyId, BodySpec};
use super::math::{Scalar, Vector};
use crate::error::SimulationError;
use std::collections::HashSet;

/// Insertion-ordered set of bodies with stable ids
///
/// Removal filters the collection in place; callers must never splice by
/// index while iterating. Ids are never reused within one universe.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    bodies: Vec<Body>,
    next_id: u64,
}

impl Universe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a universe from an initial body list, in order
    pub fn from_specs(specs: impl IntoIterator<Item = BodySpec>) -> Result<Self, SimulationError> {
        let mut universe = Self::new();
        for spec in specs {
            universe.spawn(spec)?;
        }
        Ok(universe)
    }

    pub fn spawn(&mut self, spec: BodySpec) -> Result<BodyId, SimulationError> {
        spec.validate()?;
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body::from_spec(id, spec));
        Ok(id)
    }

    /// Remove every body whose id is in `ids`, keeping the order of the rest
    pub fn remove_all(&mut self, ids: &HashSet<BodyId>) -> usize {
        let before = self.bodies.len();
        self.bodies.retain(|body| !ids.contains(&body.id));
        before - self.bodies.len()
    }

    /// Drop all bodies; ids keep increasing so stale handles never alias
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|body| body.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|body| body.name == name)
    }

    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    #[inline]
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn total_momentum(&self) -> Vector {
        self.bodies.iter().map(Body::momentum).sum()
    }

    pub fn total_mass(&self) -> Scalar {
        self.bodies.iter().map(|body| body.mass).sum()
    }

    /// Mass-weighted center, or `None` for an empty universe
    pub fn barycenter(&self) -> Option<Vector> {
        let total_mass = self.total_mass();
        if total_mass <= Scalar::EPSILON {
            return None;
        }

        let weighted: Vector = self
            .bodies
            .iter()
            .map(|body| body.position * body.mass)
            .sum();
        Some(weighted / total_mass)
    }

    /// Kinetic plus pairwise gravitational potential energy
    pub fn total_energy(&self, g: Scalar) -> Scalar {
        let kinetic: Scalar = self.bodies.iter().map(Body::kinetic_energy).sum();

        let mut potential = 0.0;
        for (i, a) in self.bodies.iter().enumerate() {
            for b in &self.bodies[i + 1..] {
                let distance = a.distance_to(b);
                if distance > 0.0 {
                    potential -= g * a.mass * b.mass / distance;
                }
            }
        }

        kinetic + potential
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rock(name: &str, x: Scalar) -> BodySpec {
        BodySpec::new(name, 1.0, 1.0).at(Vector::new(x, 0.0))
    }

    #[test]
    fn test_spawn_assigns_increasing_ids() {
        let mut universe = Universe::new();
        let a = universe.spawn(rock("a", 0.0)).unwrap();
        let b = universe.spawn(rock("b", 1.0)).unwrap();

        assert!(a < b);
        assert_eq!(universe.len(), 2);
        assert_eq!(universe.get(b).unwrap().name, "b");
    }

    #[test]
    fn test_remove_all_preserves_order() {
        let mut universe =
            Universe::from_specs(["a", "b", "c", "d"].into_iter().map(|n| rock(n, 0.0))).unwrap();
        let doomed: HashSet<BodyId> = [universe.bodies()[1].id, universe.bodies()[3].id].into();

        assert_eq!(universe.remove_all(&doomed), 2);

        let names: Vec<&str> = universe.iter().map(|body| body.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut universe = Universe::new();
        let first = universe.spawn(rock("a", 0.0)).unwrap();
        universe.clear();
        let second = universe.spawn(rock("a", 0.0)).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_spawn_rejects_massless_body() {
        let mut universe = Universe::new();
        assert!(universe.spawn(BodySpec::new("void", 0.0, 1.0)).is_err());
        assert!(universe.is_empty());
    }

    #[test]
    fn test_barycenter_of_two_bodies() {
        let universe = Universe::from_specs([
            BodySpec::new("heavy", 3.0, 1.0).at(Vector::new(0.0, 0.0)),
            BodySpec::new("light", 1.0, 1.0).at(Vector::new(4.0, 0.0)),
        ])
        .unwrap();

        assert_eq!(universe.barycenter(), Some(Vector::new(1.0, 0.0)));
        assert_eq!(Universe::new().barycenter(), None);
    }

    #[test]
    fn test_total_energy_of_bound_pair_is_negative() {
        let universe = Universe::from_specs([
            BodySpec::new("a", 1.0, 0.0).at(Vector::new(-1.0, 0.0)),
            BodySpec::new("b", 1.0, 0.0).at(Vector::new(1.0, 0.0)),
        ])
        .unwrap();

        assert!((universe.total_energy(1.0) + 0.5).abs() < 1e-12);
    }
}
