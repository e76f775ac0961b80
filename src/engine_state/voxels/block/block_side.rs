//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and maps collisions
//! onto them: a look ray or moving box that hits a block along some axis
//! strikes exactly one face, and new blocks are placed against that face.

use cgmath::Vector3;

use crate::engine_state::math::Axis;

/// Represents the six possible faces of a voxel block.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Outward unit normal of this face in grid units.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// The face struck by something travelling along `axis` with signed
    /// velocity `approach`.
    ///
    /// Moving in the positive direction hits the face pointing back toward
    /// negative, and vice versa. A zero approach counts as positive.
    pub fn struck_by(axis: Axis, approach: f32) -> BlockSide {
        let positive = approach >= 0.0;
        match (axis, positive) {
            (Axis::X, true) => BlockSide::LEFT,
            (Axis::X, false) => BlockSide::RIGHT,
            (Axis::Y, true) => BlockSide::BOTTOM,
            (Axis::Y, false) => BlockSide::TOP,
            (Axis::Z, true) => BlockSide::BACK,
            (Axis::Z, false) => BlockSide::FRONT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normals_are_unit_steps() {
        for side in [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ] {
            let normal = side.normal();
            assert_eq!(normal.x.abs() + normal.y.abs() + normal.z.abs(), 1);
        }
    }

    #[test]
    fn struck_face_points_back_at_the_approach() {
        assert_eq!(BlockSide::struck_by(Axis::X, 3.0), BlockSide::LEFT);
        assert_eq!(BlockSide::struck_by(Axis::Y, -0.5), BlockSide::TOP);
        assert_eq!(BlockSide::struck_by(Axis::Z, -1.0), BlockSide::FRONT);
        assert_eq!(BlockSide::struck_by(Axis::Z, 1.0).normal(), Vector3::new(0, 0, -1));
    }
}
