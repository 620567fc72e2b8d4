//! Content domain: data-driven tuning loaded from `assets/data`.

mod loader;
mod validation;

#[cfg(test)]
mod tests;

pub use loader::{ContentLoadError, load_movement_tuning, parse_movement_tuning};
pub use validation::{ValidationError, validate_tuning};

use bevy::prelude::*;
use std::path::Path;

use crate::core::BootSet;
use crate::movement::MovementTuning;

pub const MOVEMENT_TUNING_PATH: &str = "assets/data/movement.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_content.in_set(BootSet::Content));
    }
}

/// Replaces the default tuning with the file's, keeping defaults on failure.
fn load_content(mut tuning: ResMut<MovementTuning>) {
    match load_movement_tuning(Path::new(MOVEMENT_TUNING_PATH)) {
        Ok(loaded) => {
            info!(
                "Loaded movement tuning from {}: gravity={:.2}, jump_velocity={:.2}",
                MOVEMENT_TUNING_PATH,
                loaded.gravity(),
                loaded.jump_velocity()
            );
            *tuning = loaded;
        }
        Err(e) => {
            warn!("Using default movement tuning: {}", e);
        }
    }
}
