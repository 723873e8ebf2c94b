//! # Transform Node
//!
//! A [`TransformNode`] holds the pose of one scene object (position,
//! orientation, scale) and lazily derives from it:
//!
//! - the model matrix `T * R * S` and the view matrix (its inverse),
//! - the object-oriented bounding box (OOBB) of the object's shape,
//! - the world-space AABB and bounding sphere.
//!
//! Each derived quantity has its own [`CacheState`], tracked in a [`DirtyFlags`]
//! bitmask. Mutators only mark state dirty; the getters recompute what is dirty
//! on first read and return the cached value until the next mutation.
//!
//! ```
//! use cgmath::Vector3;
//! use facet3d::gfx::scene::transform::{ShapeKind, TransformNode};
//!
//! let mut node = TransformNode::new(ShapeKind::SphereExtent { radius: 1.0 });
//! node.move_by(Vector3::new(2.0, 0.0, 0.0));
//! let aabb = node.aabb();
//! assert_eq!(aabb.min.x, 1.0);
//! assert_eq!(aabb.max.x, 3.0);
//! ```

use std::f32::consts::FRAC_PI_2;
use std::ops::BitOr;

use cgmath::{
    ElementWise, Euler, InnerSpace, Matrix, Matrix3, Matrix4, Point3, Quaternion, Rad,
    SquareMatrix, Vector3,
};
use log::{trace, warn};

use super::bounds::{BoundingBox, BoundingSphere};
use crate::gfx::geometry::Mesh;

/// Up vector used by [`TransformNode::look_at`]
pub const DEFAULT_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

/// Largest cone half-angle accepted by [`ShapeKind::ConeExtent`]
const MAX_CONE_CUTOFF: f32 = FRAC_PI_2 - 1e-3;

/// Whether a cached quantity reflects the current pose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Clean,
    Dirty,
}

/// Bitmask of dirty cached quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyFlags(u8);

impl DirtyFlags {
    pub const NONE: Self = Self(0);
    pub const MODEL: Self = Self(1 << 0);
    pub const VIEW: Self = Self(1 << 1);
    /// The shape's OOBB and maximum vertex distance
    pub const BASE_EXTENT: Self = Self(1 << 2);
    /// AABB and bounding sphere
    pub const VOLUMES: Self = Self(1 << 3);

    pub fn state(self, flag: DirtyFlags) -> CacheState {
        if self.0 & flag.0 != 0 {
            CacheState::Dirty
        } else {
            CacheState::Clean
        }
    }

    pub fn is_dirty(self, flag: DirtyFlags) -> bool {
        self.state(flag) == CacheState::Dirty
    }

    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.0 |= flags.0;
    }

    pub fn mark_clean(&mut self, flags: DirtyFlags) {
        self.0 &= !flags.0;
    }
}

impl BitOr for DirtyFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Position, orientation and per-axis scale of an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector3<f32>,
    pub orientation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            orientation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Local-space extent of a shape: its OOBB and the largest distance from the
/// local origin to any point of the shape (unscaled).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BaseExtent {
    pub oobb: BoundingBox,
    pub max_distance: f32,
}

/// How a node's shape determines its local extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Arbitrary geometry with precomputed bounds
    Generic {
        extents: BoundingBox,
        max_distance: f32,
    },
    /// Spot light volume: apex at the origin, opening along -Z with half-angle
    /// `cutoff` (radians) out to distance `range`
    ConeExtent { cutoff: f32, range: f32 },
    /// Point light volume of the given radius
    SphereExtent { radius: f32 },
}

impl Default for ShapeKind {
    fn default() -> Self {
        ShapeKind::Generic {
            extents: BoundingBox::zero(),
            max_distance: 0.0,
        }
    }
}

impl ShapeKind {
    /// Shape covering every vertex of `mesh`. An empty mesh yields a zero extent.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        ShapeKind::Generic {
            extents: mesh.extents(),
            max_distance: mesh.max_vertex_distance(),
        }
    }

    /// Compute the local extent of this shape
    pub fn base_extent(&self) -> BaseExtent {
        match *self {
            ShapeKind::Generic {
                extents,
                max_distance,
            } => BaseExtent {
                oobb: extents,
                max_distance,
            },
            ShapeKind::ConeExtent { cutoff, range } => {
                let cutoff = cutoff.abs().min(MAX_CONE_CUTOFF);
                let range = range.abs();
                let rim = range * cutoff.tan();
                BaseExtent {
                    oobb: BoundingBox::new(
                        Vector3::new(-rim, -rim, -range),
                        Vector3::new(rim, rim, 0.0),
                    ),
                    max_distance: range / cutoff.cos(),
                }
            }
            ShapeKind::SphereExtent { radius } => {
                let radius = radius.abs();
                BaseExtent {
                    oobb: BoundingBox::new(
                        Vector3::new(-radius, -radius, -radius),
                        Vector3::new(radius, radius, radius),
                    ),
                    max_distance: radius,
                }
            }
        }
    }
}

/// Model matrix of a pose: translate, then rotate, then scale (`T * R * S`)
pub fn compose_model(pose: &Pose) -> Matrix4<f32> {
    Matrix4::from_translation(pose.position)
        * Matrix4::from(pose.orientation)
        * Matrix4::from_nonuniform_scale(pose.scale.x, pose.scale.y, pose.scale.z)
}

/// View matrix of a pose: the inverse composition `S^-1 * R^-1 * T^-1`.
///
/// A zero scale component maps to zero instead of infinity.
pub fn compose_view(pose: &Pose) -> Matrix4<f32> {
    let recip = |s: f32| if s != 0.0 { 1.0 / s } else { 0.0 };
    Matrix4::from_nonuniform_scale(recip(pose.scale.x), recip(pose.scale.y), recip(pose.scale.z))
        * Matrix4::from(pose.orientation.conjugate())
        * Matrix4::from_translation(-pose.position)
}

/// World-space AABB and bounding sphere of a local extent under `model`.
///
/// The sphere radius is the unscaled maximum distance times the length of the
/// scale vector, which never under-estimates the scaled distance.
pub fn derive_volumes(
    base: &BaseExtent,
    model: &Matrix4<f32>,
    scale: Vector3<f32>,
) -> (BoundingBox, BoundingSphere) {
    (
        base.oobb.transform_affine(model),
        BoundingSphere::new(base.max_distance * scale.magnitude()),
    )
}

fn is_finite(v: Vector3<f32>) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// Cached pose and bounding volumes of one scene object
#[derive(Debug, Clone)]
pub struct TransformNode {
    pose: Pose,
    shape: ShapeKind,
    model: Matrix4<f32>,
    view: Matrix4<f32>,
    base: BaseExtent,
    aabb: BoundingBox,
    sphere: BoundingSphere,
    dirty: DirtyFlags,
}

impl Default for TransformNode {
    fn default() -> Self {
        Self::new(ShapeKind::default())
    }
}

impl TransformNode {
    /// Create a node at the identity pose. Matrices start clean; bounding
    /// volumes are computed on first query.
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            pose: Pose::default(),
            shape,
            model: Matrix4::identity(),
            view: Matrix4::identity(),
            base: BaseExtent::default(),
            aabb: BoundingBox::zero(),
            sphere: BoundingSphere::default(),
            dirty: DirtyFlags::BASE_EXTENT | DirtyFlags::VOLUMES,
        }
    }

    /// Create a node bounding the given mesh
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self::new(ShapeKind::from_mesh(mesh))
    }

    pub fn position(&self) -> Vector3<f32> {
        self.pose.position
    }

    pub fn orientation(&self) -> Quaternion<f32> {
        self.pose.orientation
    }

    pub fn scale_factor(&self) -> Vector3<f32> {
        self.pose.scale
    }

    pub fn shape(&self) -> &ShapeKind {
        &self.shape
    }

    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    pub fn cache_state(&self, flag: DirtyFlags) -> CacheState {
        self.dirty.state(flag)
    }

    /// Replace the shape; its extent and the derived volumes are recomputed lazily
    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.shape = shape;
        self.dirty.mark_dirty(DirtyFlags::BASE_EXTENT | DirtyFlags::VOLUMES);
    }

    fn invalidate_pose(&mut self) {
        self.dirty.mark_dirty(DirtyFlags::MODEL | DirtyFlags::VIEW);
    }

    /// Offset the position
    pub fn move_by(&mut self, delta: Vector3<f32>) {
        self.pose.position += delta;
        self.invalidate_pose();
    }

    /// Compose a rotation with the current orientation (applied in local space)
    pub fn rotate(&mut self, rotation: Quaternion<f32>) {
        self.pose.orientation = (self.pose.orientation * rotation).normalize();
        self.invalidate_pose();
    }

    /// Compose a rotation given as Euler angles in radians
    pub fn rotate_euler(&mut self, angles: Vector3<f32>) {
        self.rotate(Quaternion::from(Euler {
            x: Rad(angles.x),
            y: Rad(angles.y),
            z: Rad(angles.z),
        }));
    }

    /// Multiply the current scale component-wise
    pub fn scale(&mut self, factor: Vector3<f32>) {
        self.pose.scale.mul_assign_element_wise(factor);
        self.invalidate_pose();
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.pose.position = position;
        self.invalidate_pose();
    }

    pub fn set_orientation(&mut self, orientation: Quaternion<f32>) {
        self.pose.orientation = orientation.normalize();
        self.invalidate_pose();
    }

    pub fn set_scale_factor(&mut self, scale: Vector3<f32>) {
        self.pose.scale = scale;
        self.invalidate_pose();
    }

    /// Point the node at `target` using [`DEFAULT_UP`]
    pub fn look_at(&mut self, target: Vector3<f32>) {
        self.look_at_with_up(target, DEFAULT_UP);
    }

    /// Point the node at `target`.
    ///
    /// The orientation is replaced by the look-at heading and both matrices are
    /// rebuilt immediately from the resulting pose, scale included, and left
    /// clean. Looking at the node's own position, along `up`, with a zero `up`
    /// or with non-finite input leaves the node unchanged.
    pub fn look_at_with_up(&mut self, target: Vector3<f32>, up: Vector3<f32>) {
        let direction = target - self.pose.position;
        if !is_finite(direction)
            || !is_finite(up)
            || direction.magnitude2() <= f32::EPSILON
            || up.magnitude2() <= f32::EPSILON
            || direction.normalize().cross(up.normalize()).magnitude2() <= f32::EPSILON
        {
            warn!("look_at: degenerate direction {:?} for up {:?}, ignored", direction, up);
            return;
        }

        let look = Matrix4::look_at_rh(
            Point3::new(self.pose.position.x, self.pose.position.y, self.pose.position.z),
            Point3::new(target.x, target.y, target.z),
            up,
        );
        // The look-at view has no scale, so its rotation block is orthonormal
        let rotation =
            Matrix3::from_cols(look.x.truncate(), look.y.truncate(), look.z.truncate()).transpose();
        let orientation = Quaternion::from(rotation).normalize();
        if !is_finite(orientation.v) || !orientation.s.is_finite() {
            warn!("look_at: could not derive an orientation towards {:?}, ignored", target);
            return;
        }

        self.pose.orientation = orientation;
        self.model = compose_model(&self.pose);
        self.view = compose_view(&self.pose);
        self.dirty.mark_clean(DirtyFlags::MODEL | DirtyFlags::VIEW);
        self.dirty.mark_dirty(DirtyFlags::VOLUMES);
    }

    /// Unit vector the node faces (-Z in local space)
    pub fn forward(&self) -> Vector3<f32> {
        self.pose.orientation * Vector3::new(0.0, 0.0, -1.0)
    }

    pub fn right(&self) -> Vector3<f32> {
        self.pose.orientation * Vector3::unit_x()
    }

    pub fn up(&self) -> Vector3<f32> {
        self.pose.orientation * Vector3::unit_y()
    }

    /// Model matrix, recomputed if the pose changed since the last call.
    ///
    /// Recomputing also marks the bounding volumes dirty.
    pub fn model_matrix(&mut self) -> Matrix4<f32> {
        if self.dirty.is_dirty(DirtyFlags::MODEL) {
            trace!("transform node: recomputing model matrix");
            self.model = compose_model(&self.pose);
            self.dirty.mark_clean(DirtyFlags::MODEL);
            self.dirty.mark_dirty(DirtyFlags::VOLUMES);
        }
        self.model
    }

    /// View matrix, recomputed if the pose changed since the last call
    pub fn view_matrix(&mut self) -> Matrix4<f32> {
        if self.dirty.is_dirty(DirtyFlags::VIEW) {
            trace!("transform node: recomputing view matrix");
            self.view = compose_view(&self.pose);
            self.dirty.mark_clean(DirtyFlags::VIEW);
        }
        self.view
    }

    fn refresh_volumes(&mut self) {
        if self.dirty.is_dirty(DirtyFlags::BASE_EXTENT) {
            trace!("transform node: computing base extent for {:?}", self.shape);
            self.base = self.shape.base_extent();
            self.dirty.mark_clean(DirtyFlags::BASE_EXTENT);
            self.dirty.mark_dirty(DirtyFlags::VOLUMES);
        }

        let model = self.model_matrix();
        if self.dirty.is_dirty(DirtyFlags::VOLUMES) {
            trace!("transform node: recomputing AABB and bounding sphere");
            let (aabb, sphere) = derive_volumes(&self.base, &model, self.pose.scale);
            self.aabb = aabb;
            self.sphere = sphere;
            self.dirty.mark_clean(DirtyFlags::VOLUMES);
        }
    }

    /// Local-space bounding box of the shape
    pub fn oobb(&mut self) -> BoundingBox {
        self.refresh_volumes();
        self.base.oobb
    }

    /// World-space axis-aligned bounding box
    pub fn aabb(&mut self) -> BoundingBox {
        self.refresh_volumes();
        self.aabb
    }

    /// Bounding sphere around the node's position
    pub fn bounding_sphere(&mut self) -> BoundingSphere {
        self.refresh_volumes();
        self.sphere
    }
}
