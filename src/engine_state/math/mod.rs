//! # Math Module
//!
//! Spatial primitives shared by the collision core and the chunk store:
//!
//! * `AABB3` - Axis-aligned boxes, both static and swept
//! * `Line3` - Rays used for look/target queries
//! * `Axis` / `CollisionAxes` - Axis identifiers and the collided-axis bitmask
//! * `box_iteration` - Chunk and block coordinate ranges covering a box
//!
//! All world-space values are `f32`, all grid coordinates are `i32`
//! (chunk-local coordinates are `usize`).

use cgmath::Vector3;

pub mod aabb;
pub mod axis;
pub mod box_iteration;
pub mod line;

pub use aabb::AABB3;
pub use axis::{Axis, CollisionAxes};
pub use box_iteration::{BlockPositionsInBox, ChunkPositionsInBox};
pub use line::Line3;

/// Chebyshev ("chess") distance between two vectors: the largest
/// per-axis absolute difference.
///
/// The movement loop only terminates once this reaches exactly zero.
pub fn chess_distance(a: Vector3<f32>, b: Vector3<f32>) -> f32 {
    let d = a - b;
    d.x.abs().max(d.y.abs()).max(d.z.abs())
}

/// Returns `true` if every component of `v` is finite.
pub fn is_finite(v: Vector3<f32>) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
