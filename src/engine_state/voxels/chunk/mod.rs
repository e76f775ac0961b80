//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for managing
//! 16x16x16 blocks of voxel data. It includes chunk generation algorithms and
//! the accessors the collision core reads through.
//!
//! ## Storage
//!
//! Chunks keep two views of the same data:
//! - `blocks`: every block of the chunk, dense, in x-fastest then y then z order
//! - `opaque_array`: a bit vector (1 bit per block) caching which blocks collide
//!
//! Collision reads the dense array through `block_at`. The bit vector backs
//! `is_block_opaque` and `opaque_count`, which the world uses for overlap
//! checks. Both are private to the crate and only written by
//! `ChunkCreationIterator` and `set_block_at`, which keep them in step.
//!
//! ## Readiness
//!
//! A chunk carries a `ChunkState`. Anything below `ChunkState::DataPrepared`
//! must be treated as if it were absent.

use bitvec::prelude::BitVec;
use cgmath::Point3;
use chunk_creation::ChunkCreationIterator;
use noise::NoiseFn;
use noise::Perlin;
use serde::{Deserialize, Serialize};

use super::block::block_type::BlockType;
use super::block::Block;

mod chunk_creation;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Threshold above which Perlin noise is considered solid for terrain generation.
pub const PERLIN_POSITIVE_THRESHOLD: f64 = 0.2;
/// Threshold below which Perlin noise is considered empty for terrain generation.
pub const PERLIN_NEGATIVE_THRESHOLD: f64 = -0.2;
/// Scaling factor applied to world coordinates when sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.02;

/// Coarse lifecycle of a chunk. Ordered: later states imply earlier ones.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChunkState {
    /// Allocated but the block array is not valid yet
    NotLoaded,
    /// Block array fully populated and safe to query
    DataPrepared,
}

/// How new chunks are filled.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ChunkGenerationMethod {
    /// 3D Perlin noise terrain with caves and overhangs
    Perlin {
        /// Noise seed
        seed: u32,
    },
    /// Alternating solid and air blocks
    Checkerboard,
    /// Every block solid
    Solid,
    /// Every block air
    Empty,
    /// Solid below `surface_height` (world y), air from it upward
    Flat {
        /// First air layer in world block coordinates
        surface_height: i32,
    },
}

impl Default for ChunkGenerationMethod {
    fn default() -> Self {
        ChunkGenerationMethod::Flat { surface_height: 0 }
    }
}

/// Represents a 16x16x16 collection of voxel blocks in the world.
///
/// Chunks are the fundamental unit of world data. Each chunk maintains its
/// position in the world, its readiness and its blocks.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: Point3<i32>,

    /// Readiness of the block data.
    pub state: ChunkState,

    /// One bit per block, set where the block is opaque.
    ///
    /// Indexed exactly like `blocks`.
    pub(crate) opaque_array: BitVec,

    /// Every block of the chunk, `CHUNK_SIZE` entries, x fastest then y then z.
    pub(crate) blocks: Vec<Block>,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    pub fn empty(position: &Point3<i32>) -> Self {
        let mut cci = ChunkCreationIterator::new(*position);

        for _ in 0..CHUNK_SIZE {
            cci.push_block_type(BlockType::AIR);
        }

        cci.return_chunk()
    }

    /// Generates a chunk using Perlin noise for natural-looking terrain.
    ///
    /// The terrain is generated by sampling 3D Perlin noise and applying thresholds
    /// to determine which blocks are solid.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates where the chunk will be placed
    /// * `seed` - Noise seed
    pub fn perlin(position: &Point3<i32>, seed: u32) -> Self {
        let perlin = Perlin::new(seed);
        let mut cci = ChunkCreationIterator::new(*position);

        for k in 0..CHUNK_DIMENSION {
            for j in 0..CHUNK_DIMENSION {
                for i in 0..CHUNK_DIMENSION {
                    let bposition = Point3::<i32>::new(
                        i + CHUNK_DIMENSION * position.x,
                        j + CHUNK_DIMENSION * position.y,
                        k + CHUNK_DIMENSION * position.z,
                    );
                    let perlin_sample =
                        perlin.get(Self::to_perlin_pos(bposition, PERLIN_SCALE_FACTOR));
                    if !(PERLIN_NEGATIVE_THRESHOLD..=PERLIN_POSITIVE_THRESHOLD).contains(&perlin_sample)
                    {
                        cci.push_block_type(BlockType::get_random_type());
                    } else {
                        cci.push_block_type(BlockType::AIR);
                    }
                }
            }
        }

        cci.return_chunk()
    }

    /// Converts a world block position to scaled Perlin sample coordinates.
    fn to_perlin_pos(pos: Point3<i32>, scale_factor: f64) -> [f64; 3] {
        [
            (pos.x as f64 * scale_factor),
            (pos.y as f64 * scale_factor),
            (pos.z as f64 * scale_factor),
        ]
    }

    /// Creates a new chunk filled with solid blocks.
    pub fn solid(position: &Point3<i32>) -> Self {
        let mut cci = ChunkCreationIterator::new(*position);

        for _ in 0..CHUNK_SIZE {
            cci.push_block_type(BlockType::DIRT);
        }

        cci.return_chunk()
    }

    /// Creates a new chunk with a 3D checkerboard pattern.
    pub fn checkerboard(position: &Point3<i32>) -> Self {
        let mut push_air = false;

        let mut cci = ChunkCreationIterator::new(*position);
        for i in 0..CHUNK_SIZE {
            if push_air {
                cci.push_block_type(BlockType::AIR);
            } else {
                cci.push_block_type(BlockType::DIRT);
            }

            push_air = !push_air;

            if (i + 1) % CHUNK_DIMENSION == 0 {
                push_air = !push_air
            }

            if (i + 1) % CHUNK_PLANE_SIZE == 0 {
                push_air = !push_air
            }
        }

        cci.return_chunk()
    }

    /// Creates flat terrain: dirt below `surface_height - 1`, a grass layer at
    /// `surface_height - 1`, air from `surface_height` up (world y).
    pub fn flat(position: &Point3<i32>, surface_height: i32) -> Self {
        let mut cci = ChunkCreationIterator::new(*position);

        for _k in 0..CHUNK_DIMENSION {
            for j in 0..CHUNK_DIMENSION {
                let world_y = j + CHUNK_DIMENSION * position.y;
                let block_type = if world_y == surface_height - 1 {
                    BlockType::GRASS
                } else if world_y < surface_height {
                    BlockType::DIRT
                } else {
                    BlockType::AIR
                };
                for _i in 0..CHUNK_DIMENSION {
                    cci.push_block_type(block_type);
                }
            }
        }

        cci.return_chunk()
    }

    /// Generates a chunk with the given method.
    pub fn generate(position: &Point3<i32>, method: ChunkGenerationMethod) -> Self {
        match method {
            ChunkGenerationMethod::Perlin { seed } => Chunk::perlin(position, seed),
            ChunkGenerationMethod::Checkerboard => Chunk::checkerboard(position),
            ChunkGenerationMethod::Solid => Chunk::solid(position),
            ChunkGenerationMethod::Empty => Chunk::empty(position),
            ChunkGenerationMethod::Flat { surface_height } => Chunk::flat(position, surface_height),
        }
    }

    /// Linear index of a chunk-local coordinate, `None` if out of bounds.
    #[inline]
    pub fn block_index(local: Point3<usize>) -> Option<usize> {
        let dimension = CHUNK_DIMENSION as usize;
        if local.x >= dimension || local.y >= dimension || local.z >= dimension {
            return None;
        }
        Some(local.x + dimension * local.y + dimension * dimension * local.z)
    }

    /// Whether the block data may be queried.
    pub fn is_data_prepared(&self) -> bool {
        self.state >= ChunkState::DataPrepared
    }

    /// Gets a reference to the block at the specified chunk-relative coordinates.
    ///
    /// # Returns
    /// `None` if the coordinates are outside the chunk or the block array is short.
    pub fn block_at(&self, local: Point3<usize>) -> Option<&Block> {
        Self::block_index(local).and_then(|index| self.blocks.get(index))
    }

    /// Checks if the block at the specified chunk-relative coordinates is opaque.
    ///
    /// # Returns
    /// `true` if the block is opaque, `false` if it's passable or out of bounds.
    pub fn is_block_opaque(&self, local: Point3<usize>) -> bool {
        Self::block_index(local)
            .and_then(|index| self.opaque_array.get(index).map(|bit| *bit))
            .unwrap_or(false)
    }

    /// Replaces the block at chunk-relative coordinates and keeps the opacity
    /// cache in sync.
    ///
    /// # Returns
    /// The previous block, or `None` if the coordinates are out of bounds.
    pub fn set_block_at(&mut self, local: Point3<usize>, block_type: BlockType) -> Option<Block> {
        let index = Self::block_index(local)?;
        let block = Block::new(block_type);
        let previous = std::mem::replace(self.blocks.get_mut(index)?, block);
        self.opaque_array.set(index, block.is_opaque());
        Some(previous)
    }

    /// Number of opaque blocks in the chunk.
    pub fn opaque_count(&self) -> usize {
        self.opaque_array.count_ones()
    }
}
