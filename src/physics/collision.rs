//! Collision detection and survivorship
//!
//! Every unordered pair of bodies is tested uniformly: two bodies collide
//! when their centers are no farther apart than the sum of their radii.
//! The survivorship rule decides which side of an overlapping pair is
//! destroyed; each destroyed body leaves an [`ImpactMarker`] on the surface
//! of the body it hit.
//!
//! Detection runs once per frame, after all integration sub-steps. A body
//! fast enough to cross a target entirely between two frames tunnels
//! through it undetected.

use super::body::{Body, BodyId};
use super::math::{Scalar, Vector};
use super::universe::Universe;
use bevy::log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Primaries survive unless the other body is at least this many times heavier
pub const PRIMARY_OVERWHELM_RATIO: Scalar = 10.0;

/// Non-primaries whose masses are closer than this ratio destroy each other
pub const MUTUAL_DESTRUCTION_RATIO: Scalar = 1.2;

/// A recorded collision site, for display only
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactMarker {
    /// Position in km
    pub position: Vector,
}

impl ImpactMarker {
    pub fn new(position: Vector) -> Self {
        Self { position }
    }
}

/// Who survives an overlap between `first` and `second`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Survival {
    First,
    Second,
    Both,
    Neither,
}

/// Whether `body` survives a collision with `other`
///
/// A primary keeps its place unless `other` is at least ten times heavier.
/// Between two non-primaries the heavier survives, except that masses within
/// 20% of each other destroy both.
pub fn should_survive(body: &Body, other: &Body) -> bool {
    if body.is_primary() {
        return other.mass < body.mass * PRIMARY_OVERWHELM_RATIO;
    }
    if other.is_primary() {
        return body.mass >= other.mass * PRIMARY_OVERWHELM_RATIO;
    }

    let ratio = body.mass.max(other.mass) / body.mass.min(other.mass);
    if ratio < MUTUAL_DESTRUCTION_RATIO {
        return false;
    }

    body.mass > other.mass
}

/// Resolve the survivorship rule for an overlapping pair
///
/// Each side is judged on its own, so the outcome does not depend on the
/// order of the pair. Only two primaries can both survive.
pub fn survival(first: &Body, second: &Body) -> Survival {
    match (should_survive(first, second), should_survive(second, first)) {
        (true, true) => Survival::Both,
        (true, false) => Survival::First,
        (false, true) => Survival::Second,
        (false, false) => Survival::Neither,
    }
}

#[inline]
pub fn overlaps(a: &Body, b: &Body) -> bool {
    a.distance_to(b) <= a.radius + b.radius
}

/// Point on `target`'s surface closest to `impactor`'s center
///
/// Coincident centers have no direction, so the marker goes to the +x point
/// of the surface.
pub fn impact_point(impactor: &Body, target: &Body) -> Vector {
    let offset = impactor.position - target.position;
    let distance = offset.length();

    if distance == 0.0 {
        return target.position + Vector::new(target.radius, 0.0);
    }

    target.position + offset / distance * target.radius
}

/// One destroyed body and the body it struck
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub destroyed: BodyId,
    pub target: BodyId,
    pub impact: ImpactMarker,
}

/// Scan every pair once and decide the losers, without mutating anything
///
/// Bodies already doomed earlier in the scan are not considered as sources of
/// further collisions in the same frame.
pub fn detect_collisions(bodies: &[Body]) -> Vec<Collision> {
    let mut collisions = Vec::new();
    let mut doomed: HashSet<BodyId> = HashSet::new();

    for (i, first) in bodies.iter().enumerate() {
        for second in &bodies[i + 1..] {
            if doomed.contains(&first.id) {
                break;
            }
            if doomed.contains(&second.id) || !overlaps(first, second) {
                continue;
            }

            let mut destroy = |loser: &Body, survivor: &Body| {
                doomed.insert(loser.id);
                collisions.push(Collision {
                    destroyed: loser.id,
                    target: survivor.id,
                    impact: ImpactMarker::new(impact_point(loser, survivor)),
                });
            };

            match survival(first, second) {
                Survival::Both => {}
                Survival::First => destroy(second, first),
                Survival::Second => destroy(first, second),
                Survival::Neither => {
                    destroy(first, second);
                    destroy(second, first);
                }
            }
        }
    }

    collisions
}

/// Outcome of resolving a frame's collisions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub collisions: Vec<Collision>,
}

impl CollisionReport {
    pub fn impacts(&self) -> impl Iterator<Item = ImpactMarker> + '_ {
        self.collisions.iter().map(|collision| collision.impact)
    }

    pub fn removed(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.collisions.iter().map(|collision| collision.destroyed)
    }
}

/// Detect collisions, then remove every loser once the scan is complete
pub fn resolve_collisions(universe: &mut Universe) -> CollisionReport {
    let collisions = detect_collisions(universe.bodies());
    if collisions.is_empty() {
        return CollisionReport::default();
    }

    for collision in &collisions {
        if let (Some(destroyed), Some(target)) = (
            universe.get(collision.destroyed),
            universe.get(collision.target),
        ) {
            info!("{} crashed into {}!", destroyed.name, target.name);
        }
    }

    let doomed: HashSet<BodyId> = collisions.iter().map(|c| c.destroyed).collect();
    universe.remove_all(&doomed);

    CollisionReport { collisions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::BodySpec;

    fn body(id: u64, mass: Scalar, radius: Scalar, x: Scalar) -> Body {
        Body::from_spec(
            BodyId(id),
            BodySpec::new(format!("body-{id}"), mass, radius).at(Vector::new(x, 0.0)),
        )
    }

    fn primary(id: u64, mass: Scalar, radius: Scalar, x: Scalar) -> Body {
        Body::from_spec(
            BodyId(id),
            BodySpec::new(format!("primary-{id}"), mass, radius)
                .at(Vector::new(x, 0.0))
                .primary(),
        )
    }

    #[test]
    fn test_touching_counts_as_overlap() {
        assert!(overlaps(&body(1, 1.0, 1.0, 0.0), &body(2, 1.0, 1.0, 2.0)));
        assert!(!overlaps(&body(1, 1.0, 1.0, 0.0), &body(2, 1.0, 1.0, 2.001)));
    }

    #[test]
    fn test_primary_survives_light_impactor() {
        let earth = primary(1, 5.972e24, 6371.0, 0.0);
        let satellite = body(2, 1000.0, 0.1, 6000.0);

        assert!(should_survive(&earth, &satellite));
        assert!(!should_survive(&satellite, &earth));
        assert_eq!(survival(&earth, &satellite), Survival::First);
        assert_eq!(survival(&satellite, &earth), Survival::Second);
    }

    #[test]
    fn test_primary_falls_to_ten_times_heavier_body() {
        let moon = primary(1, 1.0e22, 1737.0, 0.0);
        let just_under = body(2, 9.99e22, 1.0, 0.0);
        let exactly = body(3, 1.0e23, 1.0, 0.0);

        assert!(should_survive(&moon, &just_under));
        assert!(!should_survive(&moon, &exactly));
        assert!(should_survive(&exactly, &moon));
        assert_eq!(survival(&exactly, &moon), Survival::First);
    }

    #[test]
    fn test_comparable_primaries_both_survive_in_either_order() {
        let a = primary(1, 1.0e24, 10.0, 0.0);
        let b = primary(2, 2.0e24, 10.0, 5.0);

        assert_eq!(survival(&a, &b), Survival::Both);
        assert_eq!(survival(&b, &a), Survival::Both);
        assert!(detect_collisions(&[a.clone(), b.clone()]).is_empty());
        assert!(detect_collisions(&[b, a]).is_empty());
    }

    #[test]
    fn test_overwhelmed_primary_loses_in_either_order() {
        let moon = primary(1, 1.0e22, 1737.0, 0.0);
        let giant = primary(2, 1.0e23, 100.0, 10.0);

        assert_eq!(survival(&moon, &giant), Survival::Second);
        assert_eq!(survival(&giant, &moon), Survival::First);

        for bodies in [[moon.clone(), giant.clone()], [giant.clone(), moon.clone()]] {
            let collisions = detect_collisions(&bodies);
            assert_eq!(collisions.len(), 1);
            assert_eq!(collisions[0].destroyed, BodyId(1));
            assert_eq!(collisions[0].target, BodyId(2));
        }
    }

    #[test]
    fn test_similar_masses_destroy_each_other() {
        let a = body(1, 1000.0, 1.0, 0.0);
        let b = body(2, 1050.0, 1.0, 1.0);

        assert!(!should_survive(&a, &b));
        assert!(!should_survive(&b, &a));
        assert_eq!(survival(&a, &b), Survival::Neither);
    }

    #[test]
    fn test_heavier_non_primary_survives() {
        let heavy = body(1, 1300.0, 1.0, 0.0);
        let light = body(2, 1000.0, 1.0, 1.0);

        assert_eq!(survival(&heavy, &light), Survival::First);
        assert_eq!(survival(&light, &heavy), Survival::Second);
    }

    #[test]
    fn test_impact_point_lies_on_target_surface() {
        let target = body(1, 1e24, 100.0, 0.0);
        let mut impactor = body(2, 1.0, 1.0, 0.0);
        impactor.position = Vector::new(30.0, 40.0);

        let point = impact_point(&impactor, &target);

        assert!((point - Vector::new(60.0, 80.0)).length() < 1e-12);
    }

    #[test]
    fn test_impact_point_for_coincident_centers() {
        let target = body(1, 1e24, 100.0, 7.0);
        let impactor = body(2, 1.0, 1.0, 7.0);

        assert_eq!(impact_point(&impactor, &target), Vector::new(107.0, 0.0));
    }

    #[test]
    fn test_doomed_body_is_not_evaluated_again() {
        // The first pair dooms the middle rock; its overlap with the last
        // rock must not produce a second collision.
        let bodies = [
            primary(1, 1e24, 10.0, 0.0),
            body(2, 1000.0, 1.0, 10.5),
            body(3, 1030.0, 1.0, 12.0),
        ];

        let collisions = detect_collisions(&bodies);

        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].destroyed, BodyId(2));
        assert_eq!(collisions[0].target, BodyId(1));
    }

    #[test]
    fn test_distant_bodies_do_not_collide() {
        let bodies = [body(1, 1.0, 1.0, 0.0), body(2, 1.0, 1.0, 100.0)];
        assert!(detect_collisions(&bodies).is_empty());
    }

    #[test]
    fn test_resolve_removes_after_scan() {
        let mut universe = Universe::from_specs([
            BodySpec::new("Earth", 5.972e24, 6371.0).primary(),
            BodySpec::new("Probe", 1000.0, 0.1).at(Vector::new(6000.0, 0.0)),
            BodySpec::new("Moon", 7.3e22, 1737.4).at(Vector::new(384400.0, 0.0)),
        ])
        .unwrap();

        let report = resolve_collisions(&mut universe);

        assert_eq!(report.removed().collect::<Vec<_>>(), [BodyId(1)]);
        assert_eq!(universe.len(), 2);
        assert!(universe.find_by_name("Probe").is_none());
        let marker = report.impacts().next().unwrap();
        assert!((marker.position - Vector::new(6371.0, 0.0)).length() < 1e-9);
    }
}
