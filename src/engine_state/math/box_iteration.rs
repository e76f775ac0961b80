//! # Box Iteration Module
//!
//! Iterators over the grid cells touched by a box.
//!
//! A box covers the blocks from `floor(min)` to `floor(max)` inclusive, so a
//! box whose face lies exactly on a grid plane also visits the cell on the far
//! side of that plane. That is what lets a resting box see the block it is
//! about to be pushed into.
//!
//! Both iterators walk x fastest, then y, then z, which keeps scans
//! deterministic.

use cgmath::{Point3, Vector3};

use super::AABB3;

/// Integer block range `[floor(min), floor(max)]` covered by `aabb`.
pub fn block_bounds(aabb: &AABB3) -> (Point3<i32>, Point3<i32>) {
    let min = aabb.min();
    let max = aabb.max();
    (
        Point3::new(min.x.floor() as i32, min.y.floor() as i32, min.z.floor() as i32),
        Point3::new(max.x.floor() as i32, max.y.floor() as i32, max.z.floor() as i32),
    )
}

/// Inclusive 3D integer range walked x, then y, then z.
#[derive(Clone, Debug)]
struct GridRange {
    min: Point3<i32>,
    max: Point3<i32>,
    cursor: Option<Point3<i32>>,
}

impl GridRange {
    fn new(min: Point3<i32>, max: Point3<i32>) -> Self {
        let non_empty = min.x <= max.x && min.y <= max.y && min.z <= max.z;
        GridRange {
            min,
            max,
            cursor: non_empty.then_some(min),
        }
    }
}

impl Iterator for GridRange {
    type Item = Point3<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;

        // Only step a coordinate that is below its maximum, so no step can
        // overflow at the edge of the i32 grid.
        self.cursor = if current.x < self.max.x {
            Some(Point3::new(current.x + 1, current.y, current.z))
        } else if current.y < self.max.y {
            Some(Point3::new(self.min.x, current.y + 1, current.z))
        } else if current.z < self.max.z {
            Some(Point3::new(self.min.x, self.min.y, current.z + 1))
        } else {
            None
        };

        Some(current)
    }
}

/// Chunk coordinates of every chunk a box touches.
#[derive(Clone, Debug)]
pub struct ChunkPositionsInBox {
    range: GridRange,
}

impl ChunkPositionsInBox {
    /// Covers `aabb` with chunks of edge `chunk_dimension` blocks.
    pub fn new(aabb: &AABB3, chunk_dimension: i32) -> Self {
        let (lo, hi) = block_bounds(aabb);
        let min = Point3::new(
            lo.x.div_euclid(chunk_dimension),
            lo.y.div_euclid(chunk_dimension),
            lo.z.div_euclid(chunk_dimension),
        );
        let max = Point3::new(
            hi.x.div_euclid(chunk_dimension),
            hi.y.div_euclid(chunk_dimension),
            hi.z.div_euclid(chunk_dimension),
        );
        ChunkPositionsInBox {
            range: GridRange::new(min, max),
        }
    }
}

impl Iterator for ChunkPositionsInBox {
    type Item = Point3<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next()
    }
}

/// Chunk-local coordinates of the blocks of one chunk that a box touches.
#[derive(Clone, Debug)]
pub struct BlockPositionsInBox {
    range: GridRange,
    chunk_origin: Point3<i32>,
}

impl BlockPositionsInBox {
    /// Clips the block range of `aabb` to the chunk at `chunk_position`.
    pub fn new(aabb: &AABB3, chunk_position: Point3<i32>, chunk_dimension: i32) -> Self {
        let (lo, hi) = block_bounds(aabb);
        let chunk_origin = Point3::new(
            chunk_position.x * chunk_dimension,
            chunk_position.y * chunk_dimension,
            chunk_position.z * chunk_dimension,
        );
        let last = chunk_origin + Vector3::new(chunk_dimension - 1, chunk_dimension - 1, chunk_dimension - 1);

        let min = Point3::new(
            lo.x.max(chunk_origin.x),
            lo.y.max(chunk_origin.y),
            lo.z.max(chunk_origin.z),
        );
        let max = Point3::new(hi.x.min(last.x), hi.y.min(last.y), hi.z.min(last.z));

        BlockPositionsInBox {
            range: GridRange::new(min, max),
            chunk_origin,
        }
    }

    /// World coordinate of the chunk's (0, 0, 0) block.
    pub fn chunk_origin(&self) -> Point3<i32> {
        self.chunk_origin
    }
}

impl Iterator for BlockPositionsInBox {
    type Item = Point3<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let world = self.range.next()?;
        let local = world - self.chunk_origin;
        Some(Point3::new(local.x as usize, local.y as usize, local.z as usize))
    }
}
