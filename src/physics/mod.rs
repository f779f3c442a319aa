//! Physics core: bodies, gravity, stepping policies and collisions

pub mod body;
pub mod collision;
pub mod gravity;
pub mod integrators;
pub mod math;
pub mod step;
pub mod universe;

pub use body::{Body, BodyColor, BodyId, BodyRole, BodySpec};
pub use collision::{ImpactMarker, resolve_collisions};
pub use gravity::compute_accelerations;
pub use integrators::IntegrationMethod;
pub use step::{StepReport, StepSettings, step};
pub use universe::Universe;
