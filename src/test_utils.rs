//! Test utilities for plugin testing

use bevy::prelude::*;

/// Creates a headless test app with the core Bevy plugins the simulation
/// plugins expect
pub fn create_test_app() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        bevy::state::app::StatesPlugin,
        bevy::diagnostic::DiagnosticsPlugin,
    ));

    app
}
