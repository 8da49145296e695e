//! Math utilities and types
//!
//! Provides fundamental math types for 3D scene management and
//! spatial partitioning.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a vector
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        let matrix = self.to_matrix();
        matrix.transform_vector(&vector)
    }

    /// Combine this transform with another
    pub fn combine(&self, other: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * (self.scale.component_mul(&other.position)),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }
}

/// Axis-Aligned Bounding Box for spatial queries
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Create an AABB from two arbitrary corner points, normalizing min/max
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create a degenerate AABB holding a single point
    pub fn from_point(point: Vec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB fully contains another AABB
    ///
    /// Boundary contact counts as containment, so a box sharing a face
    /// with its container is still contained.
    pub fn contains_aabb(&self, other: &Aabb) -> bool {
        other.min.x >= self.min.x && other.max.x <= self.max.x &&
        other.min.y >= self.min.y && other.max.y <= self.max.y &&
        other.min.z >= self.min.z && other.max.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }
}

/// The eight canonical octant directions of an axis-aligned cube split.
///
/// Index layout keeps front octants on even indices and back octants on
/// odd indices: 0 = top-left-front, 1 = top-left-back, 2 = top-right-front,
/// 3 = top-right-back, 4 = bottom-left-front, 5 = bottom-left-back,
/// 6 = bottom-right-front, 7 = bottom-right-back.
pub fn octant_direction(octant: usize) -> Vec3 {
    match octant {
        0 => Vec3::new(-1.0, 1.0, 1.0),   // top-left-front
        1 => Vec3::new(-1.0, 1.0, -1.0),  // top-left-back
        2 => Vec3::new(1.0, 1.0, 1.0),    // top-right-front
        3 => Vec3::new(1.0, 1.0, -1.0),   // top-right-back
        4 => Vec3::new(-1.0, -1.0, 1.0),  // bottom-left-front
        5 => Vec3::new(-1.0, -1.0, -1.0), // bottom-left-back
        6 => Vec3::new(1.0, -1.0, 1.0),   // bottom-right-front
        7 => Vec3::new(1.0, -1.0, -1.0),  // bottom-right-back
        _ => panic!("unknown octant value given: {octant}"),
    }
}

/// Compute the bounding box of one octant of a node
///
/// The octant spans from the node center to the corner reached by the
/// octant direction scaled by the node extents.
pub fn octant_bounds(center: Vec3, extents: Vec3, octant: usize) -> Aabb {
    let corner = center + extents.component_mul(&octant_direction(octant));
    Aabb::from_corners(center, corner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_contains_point() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        assert!(aabb.contains_point(Vec3::zeros()));
        assert!(aabb.contains_point(Vec3::new(0.5, 0.5, 0.5)));
        assert!(!aabb.contains_point(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_aabb_contains_aabb() {
        let outer = Aabb::new(Vec3::new(-2.0, -2.0, -2.0), Vec3::new(2.0, 2.0, 2.0));
        let inner = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let straddling = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 3.0, 3.0));

        assert!(outer.contains_aabb(&inner));
        assert!(!inner.contains_aabb(&outer));
        assert!(!outer.contains_aabb(&straddling));
        // Boundary contact still counts as contained
        assert!(outer.contains_aabb(&outer));
    }

    #[test]
    fn test_aabb_intersects() {
        let aabb1 = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        let aabb2 = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 3.0, 3.0));
        let aabb3 = Aabb::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(7.0, 7.0, 7.0));

        assert!(aabb1.intersects(&aabb2));
        assert!(!aabb1.intersects(&aabb3));
    }

    #[test]
    fn test_octant_bounds_cover_parent() {
        let center = Vec3::zeros();
        let extents = Vec3::new(4.0, 4.0, 4.0);
        let parent = Aabb::from_center_extents(center, extents);

        for octant in 0..8 {
            let bounds = octant_bounds(center, extents, octant);
            assert!(parent.contains_aabb(&bounds));
            assert_eq!(bounds.extents(), extents * 0.5);
        }

        // Top-right-front octant is the all-positive corner
        let trf = octant_bounds(center, extents, 2);
        assert_eq!(trf.min, Vec3::zeros());
        assert_eq!(trf.max, Vec3::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn test_transform_combine() {
        let parent = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        let child = Transform::from_position(Vec3::new(0.0, 2.0, 0.0));
        let combined = parent.combine(&child);

        assert_eq!(combined.position, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_transform_to_matrix_carries_translation() {
        use approx::assert_relative_eq;

        let transform = Transform::from_position(Vec3::new(2.0, -3.0, 4.0));
        let matrix = transform.to_matrix();
        let moved = matrix.transform_point(&nalgebra::Point3::origin());

        assert_relative_eq!(moved.x, 2.0);
        assert_relative_eq!(moved.y, -3.0);
        assert_relative_eq!(moved.z, 4.0);
    }
}
