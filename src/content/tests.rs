//! Content domain: tests for tuning parsing and validation.

use std::path::Path;

use super::{
    ContentLoadError, ValidationError, load_movement_tuning, parse_movement_tuning,
    validate_tuning,
};
use crate::movement::MovementTuning;
use crate::movement::collision::STEP_CLEARANCE_MARGIN;

// -----------------------------------------------------------------------------
// Parsing tests
// -----------------------------------------------------------------------------

#[test]
fn test_shipped_tuning_file_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data/movement.ron");
    let tuning = load_movement_tuning(&path).expect("shipped tuning should load");
    assert_eq!(tuning, MovementTuning::default());
}

#[test]
fn test_missing_fields_keep_defaults() {
    let tuning = parse_movement_tuning("(move_speed: 7.5)", Path::new("inline.ron"))
        .expect("partial tuning should parse");
    assert_eq!(tuning.move_speed, 7.5);
    assert_eq!(tuning.jump_height, MovementTuning::default().jump_height);
    assert_eq!(tuning.blink_toggles, 8);
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_movement_tuning("(move_speed: ", Path::new("broken.ron")).unwrap_err();
    assert!(matches!(err, ContentLoadError::Parse { .. }));
    assert!(err.to_string().contains("broken.ron"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_movement_tuning(Path::new("does/not/exist.ron")).unwrap_err();
    assert!(matches!(err, ContentLoadError::Io { .. }));
}

#[test]
fn test_invalid_values_are_rejected() {
    let err = parse_movement_tuning("(skin_width: 0.0)", Path::new("bad.ron")).unwrap_err();
    match err {
        ContentLoadError::Invalid { errors, .. } => {
            assert!(errors.contains(&ValidationError::NotPositive {
                field: "skin_width",
                min: 0.0,
                value: 0.0,
            }));
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}

// -----------------------------------------------------------------------------
// Validation tests
// -----------------------------------------------------------------------------

#[test]
fn test_default_tuning_is_valid() {
    assert!(validate_tuning(&MovementTuning::default()).is_empty());
}

#[test]
fn test_skin_wider_than_half_body() {
    let tuning = MovementTuning {
        skin_width: 0.45,
        ..MovementTuning::default()
    };
    let errors = validate_tuning(&tuning);
    assert!(errors.iter().any(|e| matches!(e, ValidationError::SkinTooWide { .. })));
}

#[test]
fn test_ray_counts_below_two() {
    let tuning = MovementTuning {
        horizontal_ray_count: 1,
        vertical_ray_count: 0,
        ..MovementTuning::default()
    };
    let errors = validate_tuning(&tuning);
    let ray_errors = errors
        .iter()
        .filter(|e| matches!(e, ValidationError::TooFewRays { .. }))
        .count();
    assert_eq!(ray_errors, 2);
}

#[test]
fn test_traversable_angle_bounds() {
    // The step clearance probe needs a slope shallower than the limit.
    for angle in [0.0, 1.5, STEP_CLEARANCE_MARGIN, 90.0, -10.0, f32::NAN] {
        let tuning = MovementTuning {
            max_traversable_angle: angle,
            ..MovementTuning::default()
        };
        let errors = validate_tuning(&tuning);
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ValidationError::AngleOutOfRange(_))),
            "angle {angle} should be rejected"
        );
    }

    let tuning = MovementTuning {
        max_traversable_angle: STEP_CLEARANCE_MARGIN + 1.0,
        ..MovementTuning::default()
    };
    assert!(validate_tuning(&tuning).is_empty());
}

#[test]
fn test_step_must_exceed_skin() {
    let tuning = MovementTuning {
        max_step_height: 0.05,
        ..MovementTuning::default()
    };
    assert!(
        validate_tuning(&tuning)
            .iter()
            .any(|e| matches!(e, ValidationError::StepBelowSkin { .. }))
    );
}

#[test]
fn test_control_return_within_blinks() {
    let tuning = MovementTuning {
        control_return_toggle: 8,
        ..MovementTuning::default()
    };
    assert_eq!(
        validate_tuning(&tuning),
        vec![ValidationError::ControlReturnOutOfRange {
            toggle: 8,
            blink_toggles: 8,
        }]
    );
}

#[test]
fn test_every_violation_is_reported() {
    let tuning = MovementTuning {
        move_speed: -1.0,
        time_to_jump_apex: 0.0,
        horizontal_ray_count: 0,
        ..MovementTuning::default()
    };
    assert_eq!(validate_tuning(&tuning).len(), 3);
}
