//! # World Module
//!
//! This module provides the `World` struct which manages a collection of chunks in the voxel world.
//! It serves as the chunk store the collision core reads from.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach where only chunks that have been requested
//! are kept in memory. Chunks are shared through `MtResource` so that readers (the
//! collision core) and writers (block edits) can coexist behind read-write locks.
//!
//! ## Coordinates
//!
//! World block coordinates split into a chunk coordinate and a chunk-local coordinate
//! with Euclidean division, so negative coordinates land in the chunk "below" zero.

use std::collections::HashMap;
use std::sync::RwLockReadGuard;

use cgmath::Point3;

use crate::core::MtResource;
use crate::engine_state::math::{AABB3, BlockPositionsInBox, ChunkPositionsInBox};
use crate::engine_state::voxels::block::block_type::BlockType;
use crate::engine_state::voxels::block::Block;
use crate::engine_state::voxels::chunk::{Chunk, ChunkGenerationMethod, CHUNK_DIMENSION};
use crate::engine_state::voxels::chunk_grid::ChunkGrid;

/// Represents a voxel world composed of multiple chunks.
///
/// The world is stored as a sparse 3D grid of chunks, where each chunk is a 16x16x16
/// collection of blocks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_collision::{ChunkGenerationMethod, World};
///
/// let mut world = World::new(ChunkGenerationMethod::Empty);
/// world.add_chunk_at(Point3::new(0, 0, 0));
/// assert!(world.get_chunk_at(Point3::new(0, 0, 0)).is_some());
/// ```
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    pub chunks: HashMap<Point3<i32>, MtResource<Chunk>>,
    /// How `add_chunk_at` fills new chunks.
    generation: ChunkGenerationMethod,
}

/// Splits a world block coordinate into (chunk coordinate, chunk-local coordinate).
pub fn split_block_coordinate(block: Point3<i32>) -> (Point3<i32>, Point3<usize>) {
    let chunk = Point3::new(
        block.x.div_euclid(CHUNK_DIMENSION),
        block.y.div_euclid(CHUNK_DIMENSION),
        block.z.div_euclid(CHUNK_DIMENSION),
    );
    let local = Point3::new(
        block.x.rem_euclid(CHUNK_DIMENSION) as usize,
        block.y.rem_euclid(CHUNK_DIMENSION) as usize,
        block.z.rem_euclid(CHUNK_DIMENSION) as usize,
    );
    (chunk, local)
}

impl World {
    /// Creates a new, empty world that generates chunks with `generation`.
    pub fn new(generation: ChunkGenerationMethod) -> Self {
        World {
            chunks: HashMap::new(),
            generation,
        }
    }

    /// Adds a new chunk at the specified chunk coordinates if one doesn't already exist.
    ///
    /// The chunk is generated using the world's generation method.
    /// If a chunk already exists at the specified position, this method does nothing.
    ///
    /// # Performance
    ///
    /// Chunk generation can be computationally expensive, especially with Perlin noise.
    pub fn add_chunk_at(&mut self, position: Point3<i32>) {
        if self.chunks.contains_key(&position) {
            return;
        }

        let chunk = Chunk::generate(&position, self.generation);
        self.chunks.insert(position, MtResource::new(chunk));
    }

    /// Generates every chunk within `radius` chunks of `center` (a cube).
    pub fn add_chunks_around(&mut self, center: Point3<i32>, radius: i32) {
        for z in -radius..=radius {
            for y in -radius..=radius {
                for x in -radius..=radius {
                    self.add_chunk_at(Point3::new(center.x + x, center.y + y, center.z + z));
                }
            }
        }
    }

    /// Inserts a prebuilt chunk at its own position, replacing any previous one.
    pub fn insert_chunk(&mut self, chunk: Chunk) {
        self.chunks.insert(chunk.position, MtResource::new(chunk));
    }

    /// Retrieves the chunk at the specified chunk coordinates.
    ///
    /// # Returns
    ///
    /// A clone of the `MtResource<Chunk>` if the chunk exists, or `None` if not.
    pub fn get_chunk_at(&self, pos: Point3<i32>) -> Option<MtResource<Chunk>> {
        self.chunks.get(&pos).cloned()
    }

    /// Removes and returns the chunk at `pos`.
    pub fn remove_chunk_at(&mut self, pos: Point3<i32>) -> Option<MtResource<Chunk>> {
        self.chunks.remove(&pos)
    }

    /// The block at a world block coordinate, `None` if its chunk is not loaded.
    pub fn block_at(&self, block: Point3<i32>) -> Option<Block> {
        let (chunk_position, local) = split_block_coordinate(block);
        let block = self.chunks.get(&chunk_position)?.get().block_at(local).copied();
        block
    }

    /// Replaces the block at a world block coordinate.
    ///
    /// # Returns
    /// The previous block, or `None` if the chunk is not loaded.
    pub fn set_block_at(&self, block: Point3<i32>, block_type: BlockType) -> Option<Block> {
        let (chunk_position, local) = split_block_coordinate(block);
        let chunk = self.chunks.get(&chunk_position)?;
        let previous = chunk.get_mut().set_block_at(local, block_type);
        log::debug!("set block {:?} to {:?} (was {:?})", block, block_type, previous);
        previous
    }

    /// Whether `aabb` overlaps any opaque block of a loaded, data-prepared chunk
    /// by more than `epsilon`.
    pub fn intersects_opaque(&self, aabb: &AABB3, epsilon: f32) -> bool {
        ChunkPositionsInBox::new(aabb, CHUNK_DIMENSION).any(|chunk_position| {
            let Some(chunk) = self.chunk_at(chunk_position) else {
                return false;
            };
            if !chunk.is_data_prepared() {
                return false;
            }
            let positions = BlockPositionsInBox::new(aabb, chunk_position, CHUNK_DIMENSION);
            let chunk_origin = positions.chunk_origin();
            positions
                .filter(|local| chunk.is_block_opaque(*local))
                .any(|local| {
                    let block = Point3::new(
                        chunk_origin.x + local.x as i32,
                        chunk_origin.y + local.y as i32,
                        chunk_origin.z + local.z as i32,
                    );
                    AABB3::unit_cube(block).intersects(aabb, epsilon)
                })
        })
    }
}

impl ChunkGrid for World {
    type ChunkRef<'a> = RwLockReadGuard<'a, Chunk>;

    fn chunk_at(&self, position: Point3<i32>) -> Option<RwLockReadGuard<'_, Chunk>> {
        self.chunks.get(&position).map(MtResource::get)
    }
}
