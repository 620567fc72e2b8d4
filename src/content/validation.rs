//! Validation for movement tuning values.

use thiserror::Error;

use crate::movement::MovementTuning;
use crate::movement::collision::STEP_CLEARANCE_MARGIN;

/// A tuning rule that failed, with the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("'{field}' must be greater than {min}, got {value}")]
    NotPositive {
        field: &'static str,
        min: f32,
        value: f32,
    },
    #[error("skin_width {skin_width} must be smaller than half the body ({half_extent})")]
    SkinTooWide { skin_width: f32, half_extent: f32 },
    #[error("'{field}' needs at least 2 rays, got {value}")]
    TooFewRays { field: &'static str, value: usize },
    #[error(
        "max_traversable_angle must be between {} and 90 degrees, got {}",
        STEP_CLEARANCE_MARGIN,
        .0
    )]
    AngleOutOfRange(f32),
    #[error("max_step_height {step} must exceed skin_width {skin_width}")]
    StepBelowSkin { step: f32, skin_width: f32 },
    #[error("control_return_toggle {toggle} must be below blink_toggles {blink_toggles}")]
    ControlReturnOutOfRange { toggle: u32, blink_toggles: u32 },
}

/// Helper macro for checking a field is strictly positive
macro_rules! check_positive {
    ($errors:expr, $tuning:expr, $field:ident) => {
        if $tuning.$field.is_nan() || $tuning.$field <= 0.0 {
            $errors.push(ValidationError::NotPositive {
                field: stringify!($field),
                min: 0.0,
                value: $tuning.$field,
            });
        }
    };
}

/// Validate tuning values.
/// Returns every violated rule, empty if the tuning is usable.
pub fn validate_tuning(tuning: &MovementTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_positive!(errors, tuning, move_speed);
    check_positive!(errors, tuning, jump_height);
    check_positive!(errors, tuning, time_to_jump_apex);
    check_positive!(errors, tuning, max_fall_speed);
    check_positive!(errors, tuning, body_width);
    check_positive!(errors, tuning, body_height);
    check_positive!(errors, tuning, skin_width);

    let half_extent = tuning.body_width.min(tuning.body_height) * 0.5;
    if tuning.skin_width >= half_extent {
        errors.push(ValidationError::SkinTooWide {
            skin_width: tuning.skin_width,
            half_extent,
        });
    }

    if tuning.horizontal_ray_count < 2 {
        errors.push(ValidationError::TooFewRays {
            field: "horizontal_ray_count",
            value: tuning.horizontal_ray_count,
        });
    }
    if tuning.vertical_ray_count < 2 {
        errors.push(ValidationError::TooFewRays {
            field: "vertical_ray_count",
            value: tuning.vertical_ray_count,
        });
    }

    let angle = tuning.max_traversable_angle;
    if angle.is_nan() || angle <= STEP_CLEARANCE_MARGIN || angle >= 90.0 {
        errors.push(ValidationError::AngleOutOfRange(angle));
    }

    if tuning.max_step_height <= tuning.skin_width {
        errors.push(ValidationError::StepBelowSkin {
            step: tuning.max_step_height,
            skin_width: tuning.skin_width,
        });
    }

    if tuning.control_return_toggle >= tuning.blink_toggles {
        errors.push(ValidationError::ControlReturnOutOfRange {
            toggle: tuning.control_return_toggle,
            blink_toggles: tuning.blink_toggles,
        });
    }

    errors
}
