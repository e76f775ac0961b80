//! # AABB Module
//!
//! Axis-aligned bounding boxes stored as origin + span.

use std::ops::Add;

use cgmath::{EuclideanSpace, Point3, Vector3};

/// Axis-aligned bounding box: `origin` is the minimum corner, `span` the
/// non-negative extent along each axis.
///
/// A box with zero span is a point; targeting queries sweep such a box along
/// the look ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB3 {
    /// Minimum corner
    pub origin: Point3<f32>,
    /// Extent along each axis, never negative
    pub span: Vector3<f32>,
}

impl AABB3 {
    /// Creates a box from a corner and a signed span.
    ///
    /// Negative span components are folded so that `origin` is always the
    /// minimum corner.
    pub fn new(origin: Point3<f32>, span: Vector3<f32>) -> Self {
        let end = origin + span;
        AABB3 {
            origin: Point3::new(origin.x.min(end.x), origin.y.min(end.y), origin.z.min(end.z)),
            span: Vector3::new(span.x.abs(), span.y.abs(), span.z.abs()),
        }
    }

    /// A zero-size box at `origin`.
    pub fn point(origin: Point3<f32>) -> Self {
        AABB3 {
            origin,
            span: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    /// The unit cube occupied by the block at integer coordinate `coord`.
    pub fn unit_cube(coord: Point3<i32>) -> Self {
        AABB3 {
            origin: Point3::new(coord.x as f32, coord.y as f32, coord.z as f32),
            span: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Minimum corner.
    #[inline]
    pub fn min(&self) -> Point3<f32> {
        self.origin
    }

    /// Maximum corner.
    #[inline]
    pub fn max(&self) -> Point3<f32> {
        self.origin + self.span
    }

    /// This box moved by `offset`.
    pub fn translated(&self, offset: Vector3<f32>) -> Self {
        AABB3 {
            origin: self.origin + offset,
            span: self.span,
        }
    }

    /// The swept volume of this box moving by `movement`: the smallest box
    /// holding both the start and the end position.
    pub fn swept(&self, movement: Vector3<f32>) -> Self {
        let end = self.translated(movement);
        let min = self.min();
        let max = self.max();
        let end_min = end.min();
        let end_max = end.max();
        let lo = Point3::new(min.x.min(end_min.x), min.y.min(end_min.y), min.z.min(end_min.z));
        let hi = Point3::new(max.x.max(end_max.x), max.y.max(end_max.y), max.z.max(end_max.z));
        AABB3 {
            origin: lo,
            span: hi - lo,
        }
    }

    /// Whether the two boxes share volume deeper than `epsilon` on every
    /// axis. Boxes that merely touch do not intersect.
    pub fn intersects(&self, other: &AABB3, epsilon: f32) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_max.x - b_min.x > epsilon
            && b_max.x - a_min.x > epsilon
            && a_max.y - b_min.y > epsilon
            && b_max.y - a_min.y > epsilon
            && a_max.z - b_min.z > epsilon
            && b_max.z - a_min.z > epsilon
    }
}

/// Places a box given relative to the camera at the camera position.
impl Add<Point3<f32>> for AABB3 {
    type Output = AABB3;

    fn add(self, rhs: Point3<f32>) -> Self::Output {
        self.translated(rhs.to_vec())
    }
}

impl Add<Vector3<f32>> for AABB3 {
    type Output = AABB3;

    fn add(self, rhs: Vector3<f32>) -> Self::Output {
        self.translated(rhs)
    }
}
