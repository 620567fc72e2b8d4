//! Gravity-reorienting 2D platformer movement built on Bevy and Avian.

pub mod content;
pub mod core;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod movement;
