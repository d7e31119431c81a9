//! # Geometric Predicates
//!
//! Stateless tests used to decide whether and where a carve applies:
//! ray vs. axis-aligned bounding box (slab method) and point vs. finite
//! cylinder.

use glam::Vec3;

// =============================================================================
// RAY VS. BOUNDING BOX
// =============================================================================

/// Position of a ray origin relative to the box along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quadrant {
    /// Below the box minimum.
    Left,
    /// Above the box maximum.
    Right,
    /// Within `[min, max]`.
    Middle,
}

/// Parameter marking an axis that cannot supply the entry plane.
const UNUSABLE_T: f32 = -1.0;

/// Tests a ray against an axis-aligned box.
///
/// Box, origin and direction must share one coordinate frame (object space
/// of the model whose bounds are tested). The direction need not be
/// normalized.
///
/// Returns the entry point, or the origin itself when it already lies inside
/// the box. Returns `None` when the box is behind the ray or missed.
///
/// # Example
///
/// ```rust
/// use mesh_slice::hit_bounding_box;
/// use glam::Vec3;
///
/// let hit = hit_bounding_box(
///     Vec3::splat(-1.0),
///     Vec3::splat(1.0),
///     Vec3::new(0.0, 0.0, -5.0),
///     Vec3::Z,
/// );
/// assert_eq!(hit, Some(Vec3::new(0.0, 0.0, -1.0)));
/// ```
pub fn hit_bounding_box(min: Vec3, max: Vec3, origin: Vec3, dir: Vec3) -> Option<Vec3> {
    let mut quadrant = [Quadrant::Middle; 3];
    let mut candidate_plane = Vec3::ZERO;
    let mut inside = true;

    for axis in 0..3 {
        if origin[axis] < min[axis] {
            quadrant[axis] = Quadrant::Left;
            candidate_plane[axis] = min[axis];
            inside = false;
        } else if origin[axis] > max[axis] {
            quadrant[axis] = Quadrant::Right;
            candidate_plane[axis] = max[axis];
            inside = false;
        }
    }

    if inside {
        return Some(origin);
    }

    // Distance along the ray to each candidate plane
    let mut max_t = [UNUSABLE_T; 3];
    for axis in 0..3 {
        if quadrant[axis] != Quadrant::Middle && dir[axis] != 0.0 {
            max_t[axis] = (candidate_plane[axis] - origin[axis]) / dir[axis];
        }
    }

    // The last plane crossed is the only one that can be the entry face
    let mut which_plane = 0;
    for axis in 1..3 {
        if max_t[which_plane] < max_t[axis] {
            which_plane = axis;
        }
    }

    let t = max_t[which_plane];
    if t < 0.0 {
        return None;
    }

    let mut coord = Vec3::ZERO;
    for axis in 0..3 {
        if axis == which_plane {
            coord[axis] = candidate_plane[axis];
        } else {
            coord[axis] = origin[axis] + t * dir[axis];
            if coord[axis] < min[axis] || coord[axis] > max[axis] {
                return None;
            }
        }
    }

    Some(coord)
}

// =============================================================================
// CYLINDER
// =============================================================================

/// A finite cylinder around the segment `start..end`.
///
/// The flat caps sit at `start` and `end`; there is no rounding at the caps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    /// Axis start point (first cap center).
    pub start: Vec3,
    /// Axis end point (second cap center).
    pub end: Vec3,
    /// Radius of the lateral surface.
    pub radius: f32,
}

impl Cylinder {
    /// Creates a cylinder from its axis segment and radius.
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// Creates a cylinder starting at `origin` and extending `reach` units
    /// along `dir`.
    pub fn along_ray(origin: Vec3, dir: Vec3, reach: f32, radius: f32) -> Self {
        Self::new(origin, origin + dir * reach, radius)
    }

    /// Length of the axis segment.
    #[inline]
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    /// Tests whether `point` lies inside the cylinder, surface included.
    ///
    /// A zero-length cylinder contains nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mesh_slice::Cylinder;
    /// use glam::Vec3;
    ///
    /// let cyl = Cylinder::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), 1.0);
    /// assert!(cyl.contains(Vec3::new(0.5, 0.0, 5.0)));
    /// assert!(!cyl.contains(Vec3::new(0.0, 0.0, 11.0)));
    /// ```
    pub fn contains(&self, point: Vec3) -> bool {
        let Some(axis) = (self.end - self.start).try_normalize() else {
            return false;
        };

        let t = (point - self.start).dot(axis);
        if t < 0.0 || t > self.length() {
            return false;
        }

        let projection = self.start + axis * t;
        point.distance(projection) <= self.radius
    }
}
