//! Debug overlay for tuning movement by eye.
//!
//! Features:
//! - F3 toggles a gizmo overlay: body box, contact sides, trigger areas, gravity
//! - F4 logs the player motor as a JSON snapshot

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{Player, PlayerMotor, TriggerArea};

// ============================================================================
// Debug State Resource
// ============================================================================

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the gizmo overlay is drawn
    pub show_gizmos: bool,
}

// ============================================================================
// Plugin
// ============================================================================

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, (handle_debug_hotkeys, dump_motor_snapshot))
            .add_systems(
                Update,
                draw_movement_gizmos.run_if(|state: Res<DebugState>| state.show_gizmos),
            );
    }
}

// ============================================================================
// Systems
// ============================================================================

fn handle_debug_hotkeys(keyboard: Res<ButtonInput<KeyCode>>, mut debug_state: ResMut<DebugState>) {
    if keyboard.just_pressed(KeyCode::F3) {
        debug_state.show_gizmos = !debug_state.show_gizmos;
        info!(
            "[DEBUG] Movement gizmos {}",
            if debug_state.show_gizmos { "on" } else { "off" }
        );
    }
}

fn dump_motor_snapshot(
    keyboard: Res<ButtonInput<KeyCode>>,
    query: Query<&PlayerMotor, With<Player>>,
) {
    if !keyboard.just_pressed(KeyCode::F4) {
        return;
    }

    for motor in &query {
        match serde_json::to_string_pretty(&motor.snapshot()) {
            Ok(json) => info!("[DEBUG] Motor snapshot:\n{}", json),
            Err(e) => warn!("[DEBUG] Failed to serialize motor snapshot: {}", e),
        }
    }
}

fn draw_movement_gizmos(
    mut gizmos: Gizmos,
    players: Query<&PlayerMotor, With<Player>>,
    areas: Query<&ColliderAabb, With<TriggerArea>>,
) {
    for aabb in &areas {
        gizmos.rect_2d(
            Isometry2d::from_translation((aabb.min + aabb.max) * 0.5),
            aabb.max - aabb.min,
            Color::srgb(0.3, 0.6, 1.0),
        );
    }

    for motor in &players {
        let pose = motor.pose();
        let bounds = motor.resolver().bounds();
        let info = motor.collisions();

        let body_color = if info.on_steep_slope {
            Color::srgb(1.0, 0.4, 0.1)
        } else if info.stepping {
            Color::srgb(0.8, 0.3, 1.0)
        } else if info.below {
            Color::srgb(0.2, 1.0, 0.3)
        } else {
            Color::srgb(1.0, 1.0, 1.0)
        };
        gizmos.rect_2d(
            Isometry2d::new(pose.position, pose.rotation),
            bounds.half_extents() * 2.0,
            body_color,
        );

        let origins = bounds.origins(pose.position, pose.rotation);
        let contact = Color::srgb(1.0, 0.2, 0.2);
        let sides = [
            (info.below, origins.bottom_left, origins.bottom_right),
            (info.above, origins.top_left, origins.top_right),
            (info.left, origins.bottom_left, origins.top_left),
            (info.right, origins.bottom_right, origins.top_right),
        ];
        for (touching, start, end) in sides {
            if touching {
                gizmos.line_2d(start, end, contact);
            }
        }

        // Gravity arrow
        let down = motor.gravity_direction().down();
        gizmos.arrow_2d(pose.position, pose.position + down, Color::srgb(1.0, 0.9, 0.3));
    }
}
