//! # Placement
//!
//! World placement of a drawn model: translation, Euler rotation, optional
//! look-at rotation toward a target, and scale.
//!
//! ## Matrix Order
//!
//! ```text
//! M = T(position) · Rx · Ry · Rz · LookAt(target) · S(scale)
//! ```
//!
//! The look-at term is a yaw about Y (`RotationMode::YOnly`) or a yaw
//! followed by a pitch about X (`RotationMode::All`).

use glam::{Mat4, Vec2, Vec3};

/// How a placement turns toward its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMode {
    /// Ignore the target.
    #[default]
    None,
    /// Turn about the Y axis only.
    YOnly,
    /// Turn about Y, then tilt about X.
    All,
}

/// Position, orientation and scale of a model in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub scale: Vec3,
    /// Euler angles in degrees, applied X then Y then Z.
    pub rotation: Vec3,
    pub rotation_mode: RotationMode,
    pub target: Vec3,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            rotation_mode: RotationMode::None,
            target: Vec3::ZERO,
        }
    }
}

impl Placement {
    /// Placement at `position` with unit scale and no rotation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Object-to-world matrix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::Vec3;
    /// use scene_edit::Placement;
    ///
    /// let mut placement = Placement::at(Vec3::new(0.0, 0.0, -10.0));
    /// placement.scale = Vec3::splat(2.0);
    /// let world = placement.model_matrix().transform_point3(Vec3::X);
    /// assert_eq!(world, Vec3::new(2.0, 0.0, -10.0));
    /// ```
    pub fn model_matrix(&self) -> Mat4 {
        let mut matrix = Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians());

        if let Some(look_at) = self.look_at_rotation() {
            matrix *= look_at;
        }

        matrix * Mat4::from_scale(self.scale)
    }

    /// Rotation toward the target, or `None` if the mode ignores it or the
    /// target coincides with the position.
    fn look_at_rotation(&self) -> Option<Mat4> {
        if self.rotation_mode == RotationMode::None {
            return None;
        }
        let direction = (self.target - self.position).try_normalize()?;
        let yaw = Mat4::from_rotation_y(direction.x.atan2(direction.z));

        match self.rotation_mode {
            RotationMode::YOnly => Some(yaw),
            RotationMode::All => {
                let horizontal = Vec2::new(direction.x, direction.z).length();
                let pitch = -direction.y.atan2(horizontal);
                Some(yaw * Mat4::from_rotation_x(pitch))
            }
            RotationMode::None => None,
        }
    }
}

// =============================================================================
// BOUNDING BOX WIREFRAME
// =============================================================================

/// Line-list geometry outlining an axis-aligned box.
#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    /// The 8 corners: `min.z` face counter-clockwise from `min`, then the
    /// `max.z` face in the same order.
    pub corners: [Vec3; 8],
    /// 12 edges as index pairs into `corners`.
    pub lines: [u32; 24],
}

/// Edges of the box: near face, far face, then the connecting edges.
const BOX_LINES: [u32; 24] = [
    0, 1, 1, 2, 2, 3, 3, 0, //
    4, 5, 5, 6, 6, 7, 7, 4, //
    0, 4, 1, 5, 2, 6, 3, 7,
];

/// Wireframe of the box `min..max`, in the same space as the corners given.
pub fn bounding_box_wireframe(min: Vec3, max: Vec3) -> Wireframe {
    let corner = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);
    Wireframe {
        corners: [
            corner(min.x, min.y, min.z),
            corner(max.x, min.y, min.z),
            corner(max.x, max.y, min.z),
            corner(min.x, max.y, min.z),
            corner(min.x, min.y, max.z),
            corner(max.x, min.y, max.z),
            corner(max.x, max.y, max.z),
            corner(min.x, max.y, max.z),
        ],
        lines: BOX_LINES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec3_eq(actual: Vec3, expected: Vec3) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Placement::default().model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let mut placement = Placement::at(Vec3::new(1.0, 2.0, 3.0));
        placement.scale = Vec3::new(2.0, 3.0, 4.0);
        let p = placement.model_matrix().transform_point3(Vec3::ONE);
        assert_vec3_eq(p, Vec3::new(3.0, 5.0, 7.0));
    }

    #[test]
    fn test_euler_rotation_in_degrees() {
        let placement = Placement {
            rotation: Vec3::new(0.0, 90.0, 0.0),
            ..Placement::default()
        };
        let p = placement.model_matrix().transform_point3(Vec3::Z);
        assert_vec3_eq(p, Vec3::X);
    }

    #[test]
    fn test_y_only_turns_toward_target() {
        let placement = Placement {
            rotation_mode: RotationMode::YOnly,
            target: Vec3::new(5.0, 3.0, 0.0),
            ..Placement::default()
        };
        // Model forward (+Z) ends up pointing along +X; height is ignored
        let forward = placement.model_matrix().transform_vector3(Vec3::Z);
        assert_vec3_eq(forward, Vec3::X);
    }

    #[test]
    fn test_all_points_forward_at_target() {
        let target = Vec3::new(3.0, 4.0, 0.0);
        let placement = Placement {
            rotation_mode: RotationMode::All,
            target,
            ..Placement::default()
        };
        let forward = placement.model_matrix().transform_vector3(Vec3::Z);
        assert_vec3_eq(forward, target.normalize());
    }

    #[test]
    fn test_target_on_position_is_ignored() {
        let placement = Placement {
            position: Vec3::ONE,
            rotation_mode: RotationMode::All,
            target: Vec3::ONE,
            ..Placement::default()
        };
        assert_eq!(
            placement.model_matrix(),
            Mat4::from_translation(Vec3::ONE)
        );
    }

    #[test]
    fn test_wireframe_edges() {
        let min = Vec3::new(-1.0, -2.0, -3.0);
        let max = Vec3::new(1.0, 2.0, 3.0);
        let wireframe = bounding_box_wireframe(min, max);

        assert_eq!(wireframe.corners[0], min);
        assert_eq!(wireframe.corners[6], max);

        // Every edge is axis aligned and spans the full box along one axis
        for pair in wireframe.lines.chunks_exact(2) {
            let a = wireframe.corners[pair[0] as usize];
            let b = wireframe.corners[pair[1] as usize];
            let delta = (b - a).abs();
            let changed = [delta.x, delta.y, delta.z]
                .iter()
                .filter(|&&d| d > 0.0)
                .count();
            assert_eq!(changed, 1);
        }
    }
}
