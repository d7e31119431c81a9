//! # Config Crate
//!
//! Centralized configuration constants for the laser carving pipeline.
//! All magic numbers of the edit loop are defined here so the scene layer
//! and its tests agree on the same values.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EditSettings, CARVE_RADIUS, SLICE_CHECK_INTERVAL};
//!
//! let settings = EditSettings::default();
//! assert_eq!(settings.carve_radius, CARVE_RADIUS);
//! assert_eq!(settings.check_interval, SLICE_CHECK_INTERVAL);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Caller-Owned**: The slicing core never reads these values; the edit
//!   loop passes cylinders and thresholds explicitly

pub mod constants;

#[cfg(test)]
mod tests;
