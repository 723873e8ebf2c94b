//! # Bounding Volumes
//!
//! Axis-aligned boxes and origin-centred spheres used by the transform node.
//! A box is either an object-oriented box (OOBB, local space, computed once from
//! a shape's extents) or an axis-aligned box in world space (AABB, derived from
//! the OOBB and a model matrix).

use cgmath::{Matrix4, Vector3, Zero};

/// Box described by its minimum and maximum corners.
///
/// `min <= max` holds component-wise for every box built through this API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl BoundingBox {
    /// Create a box from two corners, ordering the components so `min <= max`
    pub fn new(a: Vector3<f32>, b: Vector3<f32>) -> Self {
        Self {
            min: Vector3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vector3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Degenerate box at the origin
    pub fn zero() -> Self {
        Self {
            min: Vector3::zero(),
            max: Vector3::zero(),
        }
    }

    /// Create the tightest box around a set of points.
    ///
    /// An empty set yields [`BoundingBox::zero`].
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vector3<f32>>,
    {
        let mut points = points.into_iter();
        let first = match points.next() {
            Some(p) => p,
            None => return Self::zero(),
        };

        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Vector3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Vector3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        });

        Self { min, max }
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vector3<f32> {
        (self.max - self.min) * 0.5
    }

    /// The eight corners of the box
    pub fn corners(&self) -> [Vector3<f32>; 8] {
        [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ]
    }

    /// Checks if a point lies inside the box (boundary included)
    pub fn contains(&self, point: Vector3<f32>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            min: Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Exact bounds of the eight transformed corners.
    pub fn transform_corners(&self, matrix: &Matrix4<f32>) -> Self {
        Self::from_points(
            self.corners()
                .iter()
                .map(|corner| transform_point(matrix, *corner)),
        )
    }

    /// Axis-aligned bounds of this box after an affine transform, without
    /// visiting the corners.
    ///
    /// The centre is transformed as a point; the half extents are multiplied
    /// by the component-wise absolute value of the matrix's linear 3x3 part.
    /// The result equals [`BoundingBox::transform_corners`] for affine matrices.
    pub fn transform_affine(&self, matrix: &Matrix4<f32>) -> Self {
        let center = transform_point(matrix, self.center());
        let half = self.half_extents();

        // cgmath matrices are column-major: matrix[col][row]
        let mut extent = Vector3::zero();
        for row in 0..3 {
            extent[row] = matrix[0][row].abs() * half.x
                + matrix[1][row].abs() * half.y
                + matrix[2][row].abs() * half.z;
        }

        Self {
            min: center - extent,
            max: center + extent,
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Sphere around an object's local origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingSphere {
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.abs(),
        }
    }
}

pub(crate) fn transform_point(matrix: &Matrix4<f32>, point: Vector3<f32>) -> Vector3<f32> {
    let transformed = matrix * point.extend(1.0);
    transformed.truncate() / transformed.w
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Matrix4};

    #[test]
    fn test_box_creation() {
        let points = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-1.0, -1.0, -1.0),
        ];
        let aabb = BoundingBox::from_points(points);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_empty_points_give_zero_box() {
        let aabb = BoundingBox::from_points(Vec::new());
        assert_eq!(aabb, BoundingBox::zero());
    }

    #[test]
    fn test_new_orders_corners() {
        let aabb = BoundingBox::new(Vector3::new(1.0, -2.0, 3.0), Vector3::new(-1.0, 2.0, -3.0));
        assert_eq!(aabb.min, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_affine_transform_matches_corner_transform() {
        let oobb = BoundingBox::new(Vector3::new(-1.0, -2.0, -0.5), Vector3::new(3.0, 1.0, 0.5));
        let matrix = Matrix4::from_translation(Vector3::new(4.0, -1.0, 2.0))
            * Matrix4::from_angle_y(Deg(30.0))
            * Matrix4::from_angle_x(Deg(-50.0))
            * Matrix4::from_nonuniform_scale(2.0, 0.5, 3.0);

        let fast = oobb.transform_affine(&matrix);
        let exact = oobb.transform_corners(&matrix);

        for axis in 0..3 {
            assert!((fast.min[axis] - exact.min[axis]).abs() < 1e-4);
            assert!((fast.max[axis] - exact.max[axis]).abs() < 1e-4);
        }
    }

    #[test]
    fn test_union_and_contains() {
        let a = BoundingBox::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        let b = BoundingBox::new(Vector3::new(-1.0, 0.5, 0.5), Vector3::new(0.5, 2.0, 0.5));
        let u = a.union(&b);

        assert!(u.contains(Vector3::new(-1.0, 2.0, 0.0)));
        assert!(!a.contains(Vector3::new(-0.1, 0.5, 0.5)));
    }
}
