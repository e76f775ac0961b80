//! # Line Module
//!
//! Finite rays used for "what is the player looking at" queries.

use cgmath::{InnerSpace, Point3, Vector3};

use super::AABB3;

/// A ray segment from `origin` to `origin + span`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line3 {
    /// Start point
    pub origin: Point3<f32>,
    /// Direction scaled by length
    pub span: Vector3<f32>,
}

impl Line3 {
    /// Creates a segment from a start point and a directional span.
    pub fn new(origin: Point3<f32>, span: Vector3<f32>) -> Self {
        Line3 { origin, span }
    }

    /// Creates a segment of length `length` along `direction`.
    ///
    /// A zero direction yields a zero-length segment.
    pub fn from_direction(origin: Point3<f32>, direction: Vector3<f32>, length: f32) -> Self {
        let span = if direction.magnitude2() > 0.0 {
            direction.normalize() * length
        } else {
            Vector3::new(0.0, 0.0, 0.0)
        };
        Line3 { origin, span }
    }

    /// The zero-size box at the origin that gets swept along `span`.
    pub fn origin_box(&self) -> AABB3 {
        AABB3::point(self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_direction_scales_to_length() {
        let line = Line3::from_direction(Point3::new(1.0, 1.0, 1.0), Vector3::new(0.0, 0.0, -2.0), 5.0);
        assert_eq!(line.span, Vector3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn zero_direction_gives_zero_span() {
        let line = Line3::from_direction(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0), 5.0);
        assert_eq!(line.span, Vector3::new(0.0, 0.0, 0.0));
    }
}
