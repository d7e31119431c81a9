//! # Scene Edit
//!
//! The edit loop around a sliceable model: where the model sits in the
//! world, where the laser points, when a carve check runs, and when the
//! renderer's copy of the model has to be rebuilt.
//!
//! ## Architecture
//!
//! ```text
//! camera ─→ LaserRay ─→ CarveSession::update ─→ Model::carve
//!                          │                       │
//!                      Placement               revision++
//!                    (object space)                │
//!                                          ModelBuffers::sync
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use glam::Vec3;
//! use mesh_slice::Model;
//! use scene_edit::{CarveOutcome, CarveSession, LaserRay, Placement};
//!
//! let mut model = Model::default();
//! let placement = Placement::at(Vec3::new(0.0, 0.0, -10.0));
//! let mut session = CarveSession::default();
//!
//! session.fire();
//! let ray = LaserRay::from_camera(Vec3::ZERO, Vec3::NEG_Z).unwrap();
//! let outcome = session.update(0.0, 0.016, &ray, &placement, &mut model);
//! assert_eq!(outcome, CarveOutcome::Missed);
//! ```

pub mod buffers;
pub mod laser;
pub mod placement;
pub mod session;

pub use buffers::{ModelBuffers, RenderDevice};
pub use laser::{to_object_space, LaserRay};
pub use placement::{bounding_box_wireframe, Placement, RotationMode, Wireframe};
pub use session::{CarveOutcome, CarveSession};
