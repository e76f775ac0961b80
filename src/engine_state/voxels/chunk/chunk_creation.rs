//! # Chunk Creation Module
//!
//! A builder that fills a chunk block by block in storage order
//! (x fastest, then y, then z) and keeps the opacity bit vector in step with
//! the dense block array.

use bitvec::vec::BitVec;
use cgmath::Point3;

use crate::engine_state::voxels::block::{block_type::BlockType, Block};

use super::{Chunk, ChunkState, CHUNK_SIZE};

/// A builder for creating and populating chunks.
///
/// The builder ensures that `opaque_array` and `blocks` stay the same length
/// and agree on every block. Finishing the builder marks the chunk
/// `ChunkState::DataPrepared`; blocks that were never pushed are filled with air.
pub struct ChunkCreationIterator {
    /// The chunk position of the chunk being created
    position: Point3<i32>,
    /// One bit per pushed block, set if that block is opaque
    opaque_array: BitVec,
    /// Pushed blocks in storage order
    blocks: Vec<Block>,
}

impl ChunkCreationIterator {
    /// Creates a new `ChunkCreationIterator` for building a chunk at the given position.
    ///
    /// # Arguments
    /// * `position` - The chunk position of the chunk to create
    pub fn new(position: Point3<i32>) -> Self {
        ChunkCreationIterator {
            position,
            opaque_array: BitVec::with_capacity(CHUNK_SIZE as usize),
            blocks: Vec::with_capacity(CHUNK_SIZE as usize),
        }
    }

    /// Finalizes the chunk creation and returns the constructed `Chunk`.
    ///
    /// Missing trailing blocks are padded with air; extra blocks are dropped.
    pub fn return_chunk(mut self) -> Chunk {
        let size = CHUNK_SIZE as usize;
        if self.blocks.len() < size {
            log::debug!(
                "chunk {:?} built with {} of {} blocks, padding with air",
                self.position,
                self.blocks.len(),
                size
            );
        }
        self.blocks.resize(size, Block::AIR);
        self.opaque_array.resize(size, false);

        Chunk {
            position: self.position,
            state: ChunkState::DataPrepared,
            opaque_array: self.opaque_array,
            blocks: self.blocks,
        }
    }

    /// Adds a block at the next position in storage order.
    ///
    /// # Arguments
    /// * `block_type` - The type of block to add
    pub fn push_block_type(&mut self, block_type: BlockType) {
        let block = Block::new(block_type);
        self.opaque_array.push(block.is_opaque());
        self.blocks.push(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_builds_are_padded_with_air() {
        let mut cci = ChunkCreationIterator::new(Point3::new(0, 0, 0));
        cci.push_block_type(BlockType::DIRT);
        cci.push_block_type(BlockType::WATER);

        let chunk = cci.return_chunk();
        assert_eq!(chunk.blocks.len(), CHUNK_SIZE as usize);
        assert!(chunk.is_block_opaque(Point3::new(0, 0, 0)));
        assert!(!chunk.is_block_opaque(Point3::new(1, 0, 0)));
        assert_eq!(chunk.block_at(Point3::new(1, 0, 0)), Some(&Block::new(BlockType::WATER)));
        assert_eq!(chunk.opaque_count(), 1);
    }
}
