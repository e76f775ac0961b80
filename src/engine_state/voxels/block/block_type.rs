//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification, conversion, and random generation.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// Each variant represents a distinct type of block with its own properties
/// and behavior. The `FromPrimitive` derive allows conversion from integers,
/// which is how blocks are decoded from their compact storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize)]
pub enum BlockType {
    /// An air block, which is non-solid and transparent.
    AIR,

    /// A basic dirt block, used as a common building material.
    DIRT,

    /// A grass block, the surface layer of generated terrain.
    GRASS,

    /// A wooden block.
    WOOD,

    /// A plain white block, often used for testing.
    WHITE,

    /// Water. Not opaque, so players and look rays pass through it.
    WATER,
}

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// # Arguments
    /// * `btype` - The block type as a `BlockTypeSize`
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `None` if the id is unused.
    pub fn from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Generates a random opaque terrain block type.
    ///
    /// This is used by procedural generation and tests.
    pub fn get_random_type() -> Self {
        match fastrand::u8(0..3) {
            0 => BlockType::DIRT,
            1 => BlockType::GRASS,
            _ => BlockType::WOOD,
        }
    }

    /// Whether blocks of this type collide.
    pub fn is_opaque(self) -> bool {
        super::BLOCK_TYPE_OPACITY[self as usize]
    }
}
