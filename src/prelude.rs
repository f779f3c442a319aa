//! Spacelab prelude module
//!
//! Re-exports the types most systems and tests reach for.

pub use bevy::prelude::*;

pub use crate::physics::math::{Scalar, Vector};

pub use crate::config::SimulationConfig;
pub use crate::error::SimulationError;
pub use crate::events::{BodyDestroyed, SimulationCommand};
pub use crate::simulation::Simulation;
pub use crate::states::AppState;
