//! # Axis Module
//!
//! Axis identifiers and the bitmask used to report which axes collided.

use std::ops::{BitOr, BitOrAssign};

use cgmath::Vector3;

/// One of the three world axes.
///
/// The discriminant doubles as the tie-break priority when two axes reach
/// first contact at the same time: X wins over Y, Y wins over Z.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// The X axis
    X = 0,
    /// The Y axis (up)
    Y = 1,
    /// The Z axis
    Z = 2,
}

impl Axis {
    /// All axes in priority order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Tie-break rank, lower wins.
    pub fn priority(self) -> u8 {
        self as u8
    }

    /// Reads this axis' component of `v`.
    #[inline]
    pub fn component<S: Copy>(self, v: Vector3<S>) -> S {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// Returns `v` with this axis' component replaced by `value`.
    #[inline]
    pub fn with_component<S>(self, mut v: Vector3<S>, value: S) -> Vector3<S> {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
        v
    }
}

/// Bitmask of collided axes (`X = 1`, `Y = 2`, `Z = 4`).
///
/// Per-block impulses set a single bit; the movement loop ORs them together
/// across iterations, so one tick can report several axes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CollisionAxes(u8);

impl CollisionAxes {
    /// No axis collided.
    pub const NONE: CollisionAxes = CollisionAxes(0);
    /// The X bit.
    pub const X: CollisionAxes = CollisionAxes(1);
    /// The Y bit.
    pub const Y: CollisionAxes = CollisionAxes(2);
    /// The Z bit.
    pub const Z: CollisionAxes = CollisionAxes(4);

    /// The mask with exactly `axis` set.
    pub fn from_axis(axis: Axis) -> Self {
        CollisionAxes(1 << axis as u8)
    }

    /// Raw bits.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether `axis` is set.
    pub fn contains(self, axis: Axis) -> bool {
        self.0 & Self::from_axis(axis).0 != 0
    }

    /// Whether no axis is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The axis if exactly one bit is set, `None` otherwise.
    pub fn single_axis(self) -> Option<Axis> {
        let mut set = Axis::ALL.into_iter().filter(|axis| self.contains(*axis));
        match (set.next(), set.next()) {
            (Some(axis), None) => Some(axis),
            _ => None,
        }
    }
}

impl From<Axis> for CollisionAxes {
    fn from(axis: Axis) -> Self {
        CollisionAxes::from_axis(axis)
    }
}

impl BitOr for CollisionAxes {
    type Output = CollisionAxes;

    fn bitor(self, rhs: Self) -> Self::Output {
        CollisionAxes(self.0 | rhs.0)
    }
}

impl BitOrAssign for CollisionAxes {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
