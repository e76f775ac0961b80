//! # Core Module
//!
//! Shared-ownership primitives used by the world and the engine state.
//!
//! ## Key Components
//! - `MtResource`: Thread-safe reference-counted resource with read-write locking.
//!   Chunks live in one so that collision queries can read them while block
//!   edits write to others.
//!
//! ## Usage
//! ```rust
//! use voxel_collision::core::MtResource;
//! use voxel_collision::{Chunk, World, ChunkGenerationMethod};
//! use cgmath::Point3;
//!
//! let chunk = MtResource::new(Chunk::solid(&Point3::new(0, 0, 0)));
//! assert_eq!(chunk.get().opaque_count(), 16 * 16 * 16);
//!
//! let world = MtResource::new(World::new(ChunkGenerationMethod::Empty));
//! world.get_mut().add_chunk_at(Point3::new(0, 0, 0));
//! assert_eq!(world.get().chunks.len(), 1);
//! ```

pub mod mt_resource;

pub use mt_resource::MtResource;
