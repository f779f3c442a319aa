//! Spacelab library
//!
//! A 2D Newtonian gravity sandbox: point-mass bodies in km and kg, stepped
//! by a selectable policy, with collisions resolved by a survivorship rule.
//! The physics core under [`physics`] has no ECS dependencies; the
//! [`plugins`] wrap it for a Bevy host.

pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod scenarios;
pub mod simulation;
pub mod states;

// Test utilities are public for integration tests
pub mod test_utils;
