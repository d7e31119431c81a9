//! # Configuration Constants
//!
//! Centralized constants for the laser carving pipeline. Timing, reach and
//! radius of the carve, and the placement of the laser relative to the
//! camera are defined here.
//!
//! ## Categories
//!
//! - **Timing**: Laser lifetime and slice re-check interval
//! - **Carve**: Cylinder reach and radius
//! - **Laser Placement**: Offsets of the laser beam from the camera
//! - **Precision**: Floating-point comparison tolerances

use serde::Deserialize;
use thiserror::Error;

// =============================================================================
// TIMING CONSTANTS
// =============================================================================

/// How long the laser stays active after being fired, in seconds.
///
/// # Example
///
/// ```rust
/// use config::constants::LASER_DURATION;
///
/// let mut timer = LASER_DURATION;
/// timer -= 0.25;
/// assert!(timer <= 0.0);
/// ```
pub const LASER_DURATION: f32 = 0.2;

/// Minimum time between two carve checks, in seconds.
///
/// Each check scans every triangle of the target model, so checks are
/// throttled rather than run every frame.
///
/// # Example
///
/// ```rust
/// use config::constants::SLICE_CHECK_INTERVAL;
///
/// let last_check = 1.0_f32;
/// let now = 1.05_f32;
/// assert!(now - last_check < SLICE_CHECK_INTERVAL);
/// ```
pub const SLICE_CHECK_INTERVAL: f32 = 0.1;

// =============================================================================
// CARVE CONSTANTS
// =============================================================================

/// Length of the carving cylinder along the laser direction, in object units.
///
/// # Example
///
/// ```rust
/// use config::constants::CARVE_REACH;
///
/// let origin = [0.0_f32, 0.0, 0.0];
/// let end_z = origin[2] + CARVE_REACH;
/// assert_eq!(end_z, 50.0);
/// ```
pub const CARVE_REACH: f32 = 50.0;

/// Radius of the carving cylinder, in object units.
///
/// # Example
///
/// ```rust
/// use config::constants::CARVE_RADIUS;
///
/// let radial_distance = 0.1_f32;
/// assert!(radial_distance <= CARVE_RADIUS);
/// ```
pub const CARVE_RADIUS: f32 = 0.2;

// =============================================================================
// LASER PLACEMENT CONSTANTS
// =============================================================================

/// Distance in front of the camera where the laser beam starts.
pub const LASER_FORWARD_OFFSET: f32 = 2.0;

/// Distance in front of the camera the laser beam aims at.
pub const LASER_TARGET_DISTANCE: f32 = 50.0;

/// Vertical drop of the beam below the camera's eye line.
pub const LASER_DROP: f32 = 0.5;

/// Scale of the drawn beam mesh; the long axis is Z.
pub const LASER_BEAM_SCALE: [f32; 3] = [0.5, 0.5, 10.0];

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons on single-precision positions.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f32, b: f32) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-7));
/// ```
pub const EPSILON: f32 = 1e-6;

// =============================================================================
// EDIT SETTINGS
// =============================================================================

/// Immutable snapshot of the edit loop settings.
///
/// Deserializable so a host application can load it from its own settings
/// file; missing fields fall back to the constants above.
///
/// # Examples
/// ```
/// use config::constants::EditSettings;
/// let settings = EditSettings::default();
/// assert!(settings.carve_reach > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditSettings {
    /// Laser lifetime after firing, in seconds.
    pub laser_duration: f32,
    /// Minimum time between carve checks, in seconds.
    pub check_interval: f32,
    /// Length of the carving cylinder.
    pub carve_reach: f32,
    /// Radius of the carving cylinder.
    pub carve_radius: f32,
}

impl EditSettings {
    /// Builds settings, rejecting values that would disable or invert the
    /// carve.
    ///
    /// # Examples
    /// ```
    /// use config::constants::EditSettings;
    /// let settings = EditSettings::new(0.5, 0.05, 20.0, 0.3).expect("valid settings");
    /// assert_eq!(settings.carve_reach, 20.0);
    /// assert!(EditSettings::new(0.5, 0.0, 20.0, 0.3).is_err());
    /// ```
    pub fn new(
        laser_duration: f32,
        check_interval: f32,
        carve_reach: f32,
        carve_radius: f32,
    ) -> Result<Self, ConfigError> {
        Self {
            laser_duration,
            check_interval,
            carve_reach,
            carve_radius,
        }
        .validated()
    }

    /// Checks an already-built snapshot, e.g. one produced by `serde`.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if !(self.laser_duration >= 0.0) {
            return Err(ConfigError::InvalidDuration(self.laser_duration));
        }
        if !(self.check_interval > 0.0) {
            return Err(ConfigError::InvalidInterval(self.check_interval));
        }
        if !(self.carve_reach > 0.0) {
            return Err(ConfigError::InvalidReach(self.carve_reach));
        }
        if !(self.carve_radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.carve_radius));
        }
        Ok(self)
    }
}

impl Default for EditSettings {
    fn default() -> Self {
        Self {
            laser_duration: LASER_DURATION,
            check_interval: SLICE_CHECK_INTERVAL,
            carve_reach: CARVE_REACH,
            carve_radius: CARVE_RADIUS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Raised when the laser duration is negative or NaN.
    #[error("laser_duration must be >= 0: {0}")]
    InvalidDuration(f32),
    /// Raised when the check interval is zero, negative or NaN.
    #[error("check_interval must be positive: {0}")]
    InvalidInterval(f32),
    /// Raised when the carve reach is zero, negative or NaN.
    #[error("carve_reach must be positive: {0}")]
    InvalidReach(f32),
    /// Raised when the carve radius is zero, negative or NaN.
    #[error("carve_radius must be positive: {0}")]
    InvalidRadius(f32),
}
