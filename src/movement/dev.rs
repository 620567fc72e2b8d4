//! Movement domain: hand-built test room for the demo binary.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    Checkpoint, GameLayer, GravityDirection, GravityZone, Ground, Hazard, PlayerStart, Wall,
    trigger_layers,
};

const WALL_COLOR: Color = Color::srgb(0.3, 0.3, 0.4);
const GROUND_COLOR: Color = Color::srgb(0.4, 0.5, 0.4);
const PLATFORM_COLOR: Color = Color::srgb(0.5, 0.4, 0.3);
const ZONE_COLOR: Color = Color::srgb(0.3, 0.5, 1.0);
const CHECKPOINT_COLOR: Color = Color::srgb(1.0, 0.9, 0.3);
const HAZARD_COLOR: Color = Color::srgb(1.0, 0.2, 0.2);
const ZONE_ALPHA: f32 = 0.25;

fn ground_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Ground, [GameLayer::Player])
}

fn wall_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Wall, [GameLayer::Player])
}

fn spawn_block(commands: &mut Commands, wall: bool, center: Vec2, size: Vec2, color: Color) {
    let mut entity = commands.spawn((
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(center.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
    ));
    if wall {
        entity.insert((Wall, wall_layers()));
    } else {
        entity.insert((Ground, ground_layers()));
    }
}

/// Spawns a solid right triangle; `points` are in world space.
fn spawn_ramp(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    points: [Vec2; 3],
) {
    commands.spawn((
        Ground,
        Mesh2d(meshes.add(Triangle2d::new(points[0], points[1], points[2]))),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(PLATFORM_COLOR))),
        Transform::default(),
        RigidBody::Static,
        Collider::triangle(points[0], points[1], points[2]),
        ground_layers(),
    ));
}

fn spawn_trigger(commands: &mut Commands, center: Vec2, size: Vec2, color: Color) -> Entity {
    commands
        .spawn((
            Sprite {
                color: color.with_alpha(ZONE_ALPHA),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(-1.0)),
            Collider::rectangle(size.x, size.y),
            Sensor,
            CollisionEventsEnabled,
            trigger_layers(),
        ))
        .id()
}

/// Enclosed room with a step, a walkable ramp, a steep slope, a loop of
/// gravity zones, a checkpoint and a hazard.
pub fn spawn_test_room(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.insert_resource(PlayerStart {
        position: Vec2::new(-6.0, -3.0),
        rotation_degrees: 0.0,
        facing_right: true,
    });

    // Floor, ceiling and enclosing walls
    let blocks = [
        (false, Vec2::new(0.0, -4.5), Vec2::new(24.0, 1.0), GROUND_COLOR),
        (false, Vec2::new(0.0, 8.5), Vec2::new(24.0, 1.0), GROUND_COLOR),
        (true, Vec2::new(-12.5, 2.0), Vec2::new(1.0, 14.0), WALL_COLOR),
        (true, Vec2::new(12.5, 2.0), Vec2::new(1.0, 14.0), WALL_COLOR),
        // Step low enough to climb without jumping
        (false, Vec2::new(-3.0, -3.925), Vec2::new(2.0, 0.15), PLATFORM_COLOR),
        // Plateau at the top of the ramp
        (false, Vec2::new(5.0, -3.0), Vec2::new(3.0, 2.0), PLATFORM_COLOR),
        // Low platform for head bumps
        (false, Vec2::new(-8.0, -1.0), Vec2::new(3.0, 0.4), PLATFORM_COLOR),
    ];
    for (wall, center, size, color) in blocks {
        spawn_block(&mut commands, wall, center, size, color);
    }

    // Walkable 30 degree ramp
    spawn_ramp(
        &mut commands,
        &mut meshes,
        &mut materials,
        [Vec2::new(0.0, -4.0), Vec2::new(3.5, -4.0), Vec2::new(3.5, -2.0)],
    );

    // Steep 70 degree slope the body slides down
    spawn_ramp(
        &mut commands,
        &mut meshes,
        &mut materials,
        [Vec2::new(9.0, -4.0), Vec2::new(12.0, -4.0), Vec2::new(12.0, 4.25)],
    );

    // Floor -> left wall -> ceiling -> floor loop
    let zones = [
        (Vec2::new(-10.5, -3.0), GravityDirection::Left),
        (Vec2::new(-10.5, 6.5), GravityDirection::Up),
        (Vec2::new(8.0, 6.5), GravityDirection::Down),
    ];
    for (center, direction) in zones {
        let zone = spawn_trigger(&mut commands, center, Vec2::splat(2.0), ZONE_COLOR);
        commands.entity(zone).insert(GravityZone { direction });
    }

    // Checkpoint on the plateau keeps the gravity the player arrives with
    let checkpoint = spawn_trigger(
        &mut commands,
        Vec2::new(5.0, -1.5),
        Vec2::ONE,
        CHECKPOINT_COLOR,
    );
    commands.entity(checkpoint).insert(Checkpoint::default());

    // Hazard strip along the ceiling
    let hazard = spawn_trigger(
        &mut commands,
        Vec2::new(-4.0, 7.9),
        Vec2::new(4.0, 0.2),
        HAZARD_COLOR,
    );
    commands.entity(hazard).insert(Hazard);

    info!("Spawned movement test room");
}
