//! Top-level run state of the host application

use bevy::prelude::*;

/// Physics only advances in [`AppState::Running`]
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Running,
    Paused,
}

impl AppState {
    pub fn from_paused(paused: bool) -> Self {
        if paused {
            AppState::Paused
        } else {
            AppState::Running
        }
    }
}
