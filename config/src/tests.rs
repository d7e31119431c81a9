//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and the settings builder.

use crate::constants::*;

// =============================================================================
// TIMING TESTS
// =============================================================================

#[test]
fn test_check_interval_is_positive() {
    assert!(SLICE_CHECK_INTERVAL > 0.0, "SLICE_CHECK_INTERVAL must be positive");
}

#[test]
fn test_laser_outlives_one_check() {
    // A single shot should get at least one carve check
    assert!(LASER_DURATION >= SLICE_CHECK_INTERVAL);
}

// =============================================================================
// CARVE TESTS
// =============================================================================

#[test]
fn test_carve_reach_covers_laser_target() {
    assert!(CARVE_REACH >= LASER_TARGET_DISTANCE - LASER_FORWARD_OFFSET);
}

#[test]
fn test_carve_radius_is_small() {
    assert!(CARVE_RADIUS > 0.0);
    assert!(CARVE_RADIUS < 1.0);
}

#[test]
fn test_beam_is_long_along_z() {
    let [x, y, z] = LASER_BEAM_SCALE;
    assert_eq!(x, y);
    assert!(z > x);
}

// =============================================================================
// EDIT SETTINGS TESTS
// =============================================================================

#[test]
fn test_default_settings_match_constants() {
    let settings = EditSettings::default();
    assert_eq!(settings.laser_duration, LASER_DURATION);
    assert_eq!(settings.check_interval, SLICE_CHECK_INTERVAL);
    assert_eq!(settings.carve_reach, CARVE_REACH);
    assert_eq!(settings.carve_radius, CARVE_RADIUS);
    assert_eq!(settings.validated(), Ok(settings));
}

#[test]
fn test_new_validates_inputs() {
    assert_eq!(
        EditSettings::new(-1.0, 0.1, 50.0, 0.2).unwrap_err(),
        ConfigError::InvalidDuration(-1.0)
    );
    assert_eq!(
        EditSettings::new(0.2, 0.0, 50.0, 0.2).unwrap_err(),
        ConfigError::InvalidInterval(0.0)
    );
    assert_eq!(
        EditSettings::new(0.2, 0.1, -5.0, 0.2).unwrap_err(),
        ConfigError::InvalidReach(-5.0)
    );
    assert_eq!(
        EditSettings::new(0.2, 0.1, 50.0, 0.0).unwrap_err(),
        ConfigError::InvalidRadius(0.0)
    );
}

#[test]
fn test_new_rejects_nan() {
    assert!(EditSettings::new(0.2, f32::NAN, 50.0, 0.2).is_err());
}

#[test]
fn test_zero_duration_is_allowed() {
    // A zero duration disables the laser without being an error
    let settings = EditSettings::new(0.0, 0.1, 50.0, 0.2).unwrap();
    assert_eq!(settings.laser_duration, 0.0);
}

#[test]
fn test_error_display() {
    let err = ConfigError::InvalidRadius(-0.5);
    assert!(err.to_string().contains("carve_radius"));
}

#[test]
fn test_deserialize_partial_settings() {
    let settings: EditSettings =
        serde_json::from_str(r#"{ "carve_radius": 0.75 }"#).unwrap();
    assert_eq!(settings.carve_radius, 0.75);
    assert_eq!(settings.carve_reach, CARVE_REACH);
    assert!(settings.validated().is_ok());
}

#[test]
fn test_deserialize_then_validate_rejects() {
    let settings: EditSettings =
        serde_json::from_str(r#"{ "check_interval": -1.0 }"#).unwrap();
    assert_eq!(
        settings.validated().unwrap_err(),
        ConfigError::InvalidInterval(-1.0)
    );
}
