//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, and the block data
//! structure stored inside chunks.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// This is used for efficient storage and serialization of block data.
pub type BlockTypeSize = u8;

/// Maps each block type to whether it is opaque.
///
/// Indexed by `BlockType` as a `usize`. Only opaque blocks take part in
/// collision; everything else is passable and invisible to look queries.
pub static BLOCK_TYPE_OPACITY: [bool; 6] = [
    false, // AIR
    true,  // DIRT
    true,  // GRASS
    true,  // WOOD
    true,  // WHITE
    false, // WATER
];

/// Represents a single voxel block in the world.
///
/// This is a lightweight structure that stores only the essential block data.
/// The actual block properties are looked up from the block type.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute keeps the layout stable so whole chunks can be
/// viewed as byte slices. The block type is stored as a compact `BlockTypeSize`.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq, Eq)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// An air block.
    pub const AIR: Block = Block {
        block_type: BlockType::AIR as BlockTypeSize,
    };

    /// Creates a new block of the specified type.
    ///
    /// # Arguments
    /// * `block_type` - The type of block to create
    ///
    /// # Returns
    /// A new `Block` instance with the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
        }
    }

    /// Decodes the stored type id, `None` for ids no `BlockType` uses.
    pub fn get_block_type(&self) -> Option<BlockType> {
        BlockType::from_int(self.block_type)
    }

    /// Whether this block collides and stops look rays.
    ///
    /// Unknown type ids are treated as non-opaque.
    pub fn is_opaque(&self) -> bool {
        self.get_block_type().is_some_and(BlockType::is_opaque)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_table_matches_block_types() {
        assert!(!Block::new(BlockType::AIR).is_opaque());
        assert!(!Block::new(BlockType::WATER).is_opaque());
        assert!(Block::new(BlockType::DIRT).is_opaque());
        assert!(Block::new(BlockType::WHITE).is_opaque());
    }

    #[test]
    fn unknown_ids_are_not_opaque() {
        let block = Block { block_type: 200 };
        assert!(!block.is_opaque());
        assert_eq!(block.get_block_type(), None);
    }

    #[test]
    fn blocks_cast_to_bytes() {
        let blocks = [Block::new(BlockType::GRASS), Block::AIR];
        let bytes: &[u8] = bytemuck::cast_slice(&blocks);
        assert_eq!(bytes, &[BlockType::GRASS as u8, 0]);
    }
}
