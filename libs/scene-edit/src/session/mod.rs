//! # Carve Session
//!
//! Frame-driven state of the laser: a countdown armed by [`CarveSession::fire`]
//! and a throttle limiting carve checks to one per interval.
//!
//! ## Per-frame flow
//!
//! ```text
//! update(now, dt)
//!   └─ laser armed?            no  → Idle
//!        └─ interval elapsed?  no  → Throttled
//!             └─ ray → object space → bounding box hit?
//!                  no  → Missed
//!                  yes → carve cylinder(origin, origin + dir·reach, radius) → Carved
//! ```
//!
//! Time always comes from the caller; the session never reads a clock.

use crate::laser::{to_object_space, LaserRay};
use crate::placement::{Placement, RotationMode};
use config::constants::{ConfigError, EditSettings, LASER_BEAM_SCALE};
use glam::Vec3;
use log::trace;
use mesh_slice::{hit_bounding_box, CarveSummary, Cylinder, Model};

/// Result of one [`CarveSession::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveOutcome {
    /// The laser is not firing.
    Idle,
    /// The laser is firing but the last check was too recent.
    Throttled,
    /// A check ran and the ray missed the model's bounds.
    Missed,
    /// A check ran and the cylinder was carved out of the model.
    Carved(CarveSummary),
}

/// Laser timer and check throttle for one model.
#[derive(Debug, Clone)]
pub struct CarveSession {
    settings: EditSettings,
    laser_timer: f32,
    /// Time of the last check; `None` until the first one.
    last_check: Option<f32>,
}

impl Default for CarveSession {
    fn default() -> Self {
        Self {
            settings: EditSettings::default(),
            laser_timer: 0.0,
            last_check: None,
        }
    }
}

impl CarveSession {
    /// Creates an idle session.
    pub fn new(settings: EditSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            settings: settings.validated()?,
            ..Self::default()
        })
    }

    /// Settings the session was created with.
    pub fn settings(&self) -> &EditSettings {
        &self.settings
    }

    /// Remaining laser time in seconds; zero or below when idle.
    pub fn laser_timer(&self) -> f32 {
        self.laser_timer
    }

    /// Returns true while the laser should be drawn and checked.
    pub fn is_firing(&self) -> bool {
        self.laser_timer > 0.0
    }

    /// Arms the laser for the configured duration. Firing again while
    /// armed restarts the countdown.
    pub fn fire(&mut self) {
        self.laser_timer = self.settings.laser_duration;
    }

    /// Placement of the drawn beam for `ray`, or `None` when idle.
    pub fn beam(&self, ray: &LaserRay) -> Option<Placement> {
        self.is_firing().then(|| Placement {
            position: ray.origin,
            scale: Vec3::from_array(LASER_BEAM_SCALE),
            rotation: Vec3::ZERO,
            rotation_mode: RotationMode::All,
            target: ray.target,
        })
    }

    /// Advances the session by one frame.
    ///
    /// # Arguments
    ///
    /// * `now` - Current time in seconds
    /// * `dt` - Time since the previous frame in seconds
    /// * `ray` - World-space laser ray for this frame
    /// * `placement` - World placement of `model`
    /// * `model` - Model carved on a hit
    pub fn update(
        &mut self,
        now: f32,
        dt: f32,
        ray: &LaserRay,
        placement: &Placement,
        model: &mut Model,
    ) -> CarveOutcome {
        if !self.is_firing() {
            return CarveOutcome::Idle;
        }
        self.laser_timer -= dt;

        if let Some(last) = self.last_check {
            if now - last < self.settings.check_interval {
                trace!("carve check throttled ({:.3}s since last)", now - last);
                return CarveOutcome::Throttled;
            }
        }
        self.last_check = Some(now);

        let Some(local) = to_object_space(ray, &placement.model_matrix()) else {
            trace!("model placement is not invertible; skipping check");
            return CarveOutcome::Missed;
        };

        let hit = hit_bounding_box(
            model.bounding_box_min(),
            model.bounding_box_max(),
            local.origin,
            local.direction,
        );
        if hit.is_none() {
            trace!("laser missed model bounds");
            return CarveOutcome::Missed;
        }

        let cylinder = Cylinder::along_ray(
            local.origin,
            local.direction,
            self.settings.carve_reach,
            self.settings.carve_radius,
        );
        CarveOutcome::Carved(model.carve(&cylinder))
    }
}
