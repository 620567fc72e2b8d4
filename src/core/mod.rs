//! Core domain: app-level wiring shared by every other plugin.

use bevy::camera::ScalingMode;
use bevy::prelude::*;

/// Simulation rate for movement, in ticks per second.
pub const FIXED_TICK_HZ: f64 = 60.0;

/// World units visible from the bottom to the top of the window.
const VIEW_HEIGHT: f32 = 15.0;

/// Startup ordering: content is loaded before the level is built, and the
/// level before the player is spawned into it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootSet {
    Content,
    Level,
    Spawn,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(FIXED_TICK_HZ))
            .configure_sets(
                Startup,
                (BootSet::Content, BootSet::Level, BootSet::Spawn).chain(),
            )
            .add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: VIEW_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, 2.0, 0.0),
    ));
}
