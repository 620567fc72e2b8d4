//! Movement domain: system modules for locomotion updates.

pub(crate) mod input;
pub(crate) mod movement;
pub(crate) mod zones;

pub(crate) use input::read_input;
pub(crate) use movement::{apply_tuning_changes, sync_motor_state, tick_motors};
pub(crate) use zones::{detect_triggers, handle_respawn_requests, handle_spawn_points};
