//! # Laser Ray
//!
//! The ray fired from the camera, and its transform into a model's object
//! space for hit testing against untransformed vertex data.

use config::constants::{EPSILON, LASER_DROP, LASER_FORWARD_OFFSET, LASER_TARGET_DISTANCE};
use glam::{Mat4, Vec3};

/// A ray with a start point, a unit direction and the point it aims at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaserRay {
    /// Start of the beam.
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
    /// Far end, used to orient the drawn beam.
    pub target: Vec3,
}

impl LaserRay {
    /// Ray fired from a camera at `position` looking along `front`.
    ///
    /// The beam starts ahead of and slightly below the eye.
    ///
    /// Returns `None` if `front` is zero.
    pub fn from_camera(position: Vec3, front: Vec3) -> Option<Self> {
        let drop = Vec3::new(0.0, LASER_DROP, 0.0);
        let origin = position + front * LASER_FORWARD_OFFSET - drop;
        let target = position + front * LASER_TARGET_DISTANCE - drop;
        let direction = (target - origin).try_normalize()?;
        Some(Self {
            origin,
            direction,
            target,
        })
    }

    /// Point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Brings a world-space ray into the object space of `model_matrix`.
///
/// The origin and target are transformed as points, the direction as a
/// vector and renormalized. Returns `None` if the matrix cannot be inverted
/// or collapses the direction.
///
/// # Example
///
/// ```rust
/// use glam::{Mat4, Vec3};
/// use scene_edit::{to_object_space, LaserRay};
///
/// let ray = LaserRay::from_camera(Vec3::ZERO, Vec3::NEG_Z).unwrap();
/// let model = Mat4::from_translation(Vec3::new(0.0, 0.0, -20.0));
/// let local = to_object_space(&ray, &model).unwrap();
/// assert_eq!(local.origin, Vec3::new(0.0, -0.5, 18.0));
/// assert!(local.direction.abs_diff_eq(Vec3::NEG_Z, 1e-6));
/// ```
pub fn to_object_space(ray: &LaserRay, model_matrix: &Mat4) -> Option<LaserRay> {
    let determinant = model_matrix.determinant();
    if determinant == 0.0 || !determinant.is_finite() {
        return None;
    }
    let inverse = model_matrix.inverse();

    let direction = inverse.transform_vector3(ray.direction);
    if direction.length() < EPSILON {
        return None;
    }

    Some(LaserRay {
        origin: inverse.transform_point3(ray.origin),
        direction: direction.normalize(),
        target: inverse.transform_point3(ray.target),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Placement;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_camera_offsets() {
        let ray = LaserRay::from_camera(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z).unwrap();
        assert_eq!(ray.origin, Vec3::new(0.0, 0.5, 3.0));
        assert_eq!(ray.target, Vec3::new(0.0, 0.5, -45.0));
        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn test_from_camera_zero_front() {
        assert!(LaserRay::from_camera(Vec3::ONE, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_object_space_undoes_placement() {
        let mut placement = Placement::at(Vec3::new(4.0, 0.0, -10.0));
        placement.scale = Vec3::splat(0.5);
        placement.rotation = Vec3::new(0.0, 30.0, 0.0);
        let matrix = placement.model_matrix();

        let front = Vec3::new(0.3, -0.1, -1.0).normalize();
        let world = LaserRay::from_camera(Vec3::new(1.0, 2.0, 3.0), front).unwrap();
        let local = to_object_space(&world, &matrix).unwrap();

        assert_relative_eq!(local.direction.length(), 1.0, epsilon = 1e-5);
        let back = matrix.transform_point3(local.origin);
        assert_relative_eq!(back.x, world.origin.x, epsilon = 1e-4);
        assert_relative_eq!(back.y, world.origin.y, epsilon = 1e-4);
        assert_relative_eq!(back.z, world.origin.z, epsilon = 1e-4);

        let back_direction = matrix.transform_vector3(local.direction).normalize();
        assert_relative_eq!(back_direction.dot(world.direction), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_singular_matrix_is_rejected() {
        let ray = LaserRay::from_camera(Vec3::ZERO, Vec3::X).unwrap();
        let flat = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert!(to_object_space(&ray, &flat).is_none());
    }

    #[test]
    fn test_at() {
        let ray = LaserRay::from_camera(Vec3::ZERO, Vec3::X).unwrap();
        let p = ray.at(3.0);
        assert_relative_eq!(p.x, ray.origin.x + 3.0, epsilon = 1e-5);
        assert_eq!(p.y, ray.origin.y);
    }
}
