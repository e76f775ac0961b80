//! # Chunk Grid Module
//!
//! The read-only lookup the collision core needs from whatever owns the
//! chunks: chunk coordinate in, borrowed chunk out.
//!
//! The core never owns or mutates chunks. Implementors decide how a chunk is
//! borrowed (a plain reference, a lock guard, ...) through `ChunkRef`.

use std::collections::HashMap;
use std::ops::Deref;

use cgmath::Point3;

use super::chunk::Chunk;

/// Lookup of loaded chunks by chunk coordinate.
pub trait ChunkGrid {
    /// Borrowed view of one chunk, alive as long as the grid borrow.
    type ChunkRef<'a>: Deref<Target = Chunk>
    where
        Self: 'a;

    /// The chunk at `position`, or `None` if it is not loaded.
    fn chunk_at(&self, position: Point3<i32>) -> Option<Self::ChunkRef<'_>>;
}

impl ChunkGrid for HashMap<Point3<i32>, Chunk> {
    type ChunkRef<'a> = &'a Chunk;

    fn chunk_at(&self, position: Point3<i32>) -> Option<&Chunk> {
        self.get(&position)
    }
}
