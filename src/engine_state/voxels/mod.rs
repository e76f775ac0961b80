//! # Voxel Engine Core
//!
//! This module contains the voxel data the collision core reads: blocks,
//! chunks, and the world that owns them.
//!
//! ## Architecture
//!
//! * **Block**: Individual voxel types and their opacity
//! * **Chunk**: Fixed-size 3D arrays of blocks with a readiness state
//! * **ChunkGrid**: The read-only lookup contract the collision core consumes
//! * **World**: The chunk store; generates, holds and edits chunks
//!
//! ## Thread Safety
//!
//! * Chunks are held in `MtResource` (read-write locked, reference counted)
//! * Collision reads chunks through read guards and never mutates them
//! * Block edits take a write guard on a single chunk

pub mod block;
pub mod chunk;
pub mod chunk_grid;
pub mod world;
