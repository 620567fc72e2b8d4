use avian2d::prelude::*;
use bevy::prelude::*;

use graviton::core::BootSet;
use graviton::{content, core, movement};

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Graviton".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        movement::MovementPlugin,
    ))
    .add_systems(Startup, movement::spawn_test_room.in_set(BootSet::Level));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(graviton::debug::DebugPlugin);

    app.run();
}
