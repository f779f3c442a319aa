//! Events exchanged between the host application and the simulation plugin

use crate::physics::body::BodyId;
use crate::physics::integrators::IntegrationMethod;
use crate::physics::math::{Scalar, Vector};
use crate::scenarios::Scenario;
use bevy::prelude::*;

/// Requests handled by the simulation plugin
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SimulationCommand {
    Restart,
    SwitchScenario(Scenario),
    TogglePause,
    ClearImpacts,
    SpeedUp,
    SlowDown,
    SetIntegrationMethod(IntegrationMethod),
    /// Stationary satellite at a world position
    SpawnAt(Vector),
    /// Satellite launched from `position` by a screen-space drag
    SpawnFromDrag { position: Vector, drag: Vector },
    /// Named or custom body launched by a screen-space drag
    SpawnCustom {
        name: String,
        mass: Scalar,
        radius: Scalar,
        position: Vector,
        drag: Vector,
    },
}

/// A body removed by a collision, with the marker left where it struck
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BodyDestroyed {
    pub body: BodyId,
    pub impact: Vector,
}
