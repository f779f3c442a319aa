//! Celestial body state

use crate::error::SimulationError;
use crate::physics::math::{Scalar, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable per-body handle, unique within one [`Universe`](super::Universe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Collision survivorship role of a body
///
/// Primaries (central stars and planets) are immovable by convention: they
/// survive any impact unless the other body is at least ten times heavier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRole {
    Primary,
    #[default]
    Secondary,
}

/// Display color, opaque to the physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyColor(pub u8, pub u8, pub u8);

impl BodyColor {
    pub const WHITE: Self = Self(255, 255, 255);
    pub const CYAN: Self = Self(0, 255, 255);
    pub const CUSTOM: Self = Self(255, 100, 100);
}

impl Default for BodyColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Everything needed to create a body; the universe assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub name: String,
    pub position: Vector,
    pub velocity: Vector,
    /// Mass in kg
    pub mass: Scalar,
    /// Radius in km
    pub radius: Scalar,
    #[serde(default)]
    pub color: BodyColor,
    #[serde(default)]
    pub role: BodyRole,
}

impl BodySpec {
    pub fn new(name: impl Into<String>, mass: Scalar, radius: Scalar) -> Self {
        Self {
            name: name.into(),
            position: Vector::ZERO,
            velocity: Vector::ZERO,
            mass,
            radius,
            color: BodyColor::default(),
            role: BodyRole::default(),
        }
    }

    pub fn at(mut self, position: Vector) -> Self {
        self.position = position;
        self
    }

    pub fn moving(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_color(mut self, color: BodyColor) -> Self {
        self.color = color;
        self
    }

    pub fn primary(mut self) -> Self {
        self.role = BodyRole::Primary;
        self
    }

    /// Reject states the physics cannot handle (division by mass, negative
    /// extents, non-finite kinematics).
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SimulationError::InvalidBody(format!(
                "{} has non-positive mass {}",
                self.name, self.mass
            )));
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(SimulationError::InvalidBody(format!(
                "{} has negative radius {}",
                self.name, self.radius
            )));
        }
        if !self.position.is_finite() || !self.velocity.is_finite() {
            return Err(SimulationError::InvalidBody(format!(
                "{} has a non-finite position or velocity",
                self.name
            )));
        }
        Ok(())
    }
}

/// A body in the simulated universe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    /// Position in km
    pub position: Vector,
    /// Velocity in km/s
    pub velocity: Vector,
    /// Mass in kg
    pub mass: Scalar,
    /// Radius in km
    pub radius: Scalar,
    pub color: BodyColor,
    pub role: BodyRole,
}

impl Body {
    pub fn from_spec(id: BodyId, spec: BodySpec) -> Self {
        Self {
            id,
            name: spec.name,
            position: spec.position,
            velocity: spec.velocity,
            mass: spec.mass,
            radius: spec.radius,
            color: spec.color,
            role: spec.role,
        }
    }

    #[inline]
    pub fn is_primary(&self) -> bool {
        self.role == BodyRole::Primary
    }

    /// Move along the current velocity: x(t+dt) = x(t) + v * dt
    #[inline]
    pub fn advance(&mut self, dt: Scalar) {
        self.position += self.velocity * dt;
    }

    #[inline]
    pub fn distance_to(&self, other: &Body) -> Scalar {
        self.position.distance(other.position)
    }

    #[inline]
    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass
    }

    #[inline]
    pub fn kinetic_energy(&self) -> Scalar {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_along_velocity_only() {
        let mut body = Body::from_spec(
            BodyId(1),
            BodySpec::new("probe", 10.0, 1.0)
                .at(Vector::new(1.0, 2.0))
                .moving(Vector::new(3.0, -4.0)),
        );

        body.advance(0.5);

        assert_eq!(body.position, Vector::new(2.5, 0.0));
        assert_eq!(body.velocity, Vector::new(3.0, -4.0));
    }

    #[test]
    fn test_validate_rejects_non_positive_mass() {
        assert!(BodySpec::new("ghost", 0.0, 1.0).validate().is_err());
        assert!(BodySpec::new("anti", -5.0, 1.0).validate().is_err());
        assert!(BodySpec::new("nan", Scalar::NAN, 1.0).validate().is_err());
        assert!(BodySpec::new("point", 1.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_radius() {
        let error = BodySpec::new("inside out", 1.0, -1.0).validate().unwrap_err();
        assert!(matches!(error, SimulationError::InvalidBody(_)));
    }

    #[test]
    fn test_role_defaults_to_secondary() {
        let spec = BodySpec::new("rock", 1.0, 1.0);
        assert_eq!(spec.role, BodyRole::Secondary);
        assert_eq!(spec.primary().role, BodyRole::Primary);
    }
}
