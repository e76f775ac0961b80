//! # Collision Module
//!
//! Swept box collision against the block grid.
//!
//! ## Architecture
//!
//! * **impulse**: one moving box against one block
//! * **sweep**: every block a swept box can reach, reduced to the most relevant hit
//! * **movement_controller**: repeated sweeps until a movement is fully resolved
//! * **targeting**: the block the player looks at and where a new block would go
//!
//! All entry points read chunks through `ChunkGrid` and never mutate them.

use cgmath::{Point3, Vector3};
use thiserror::Error;

use crate::engine_state::math::CollisionAxes;

pub mod impulse;
pub mod movement_controller;
pub mod sweep;
pub mod targeting;

pub use impulse::{process_collision, CollisionImpulse, TimeOfImpact, COLLISION_EPSILON};
pub use movement_controller::{MovementController, MovementResponse, MAX_RESOLUTION_ITERATIONS};
pub use sweep::{scan, MissingChunkPolicy, SweepHit, MAX_GRID_COORDINATE, MAX_SWEEP_EXTENT};
pub use targeting::{find_adding_block, find_pointing_block, find_pointing_face};

/// Failures of the collision core.
///
/// None of these happen for a well-formed world; they signal broken chunk
/// data or a caller feeding in garbage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollisionError {
    /// The resolution loop hit its iteration cap with movement left.
    #[error("movement did not converge after {iterations} iterations ({outstanding:?} outstanding)")]
    DidNotConverge {
        /// Iterations performed.
        iterations: usize,
        /// Movement still unresolved.
        outstanding: Vector3<f32>,
    },

    /// A data-prepared chunk has no block at an in-range index.
    #[error("chunk {chunk:?} has no block at {local:?}")]
    MissingBlock {
        /// Chunk coordinate.
        chunk: Point3<i32>,
        /// Chunk-local block coordinate.
        local: Point3<usize>,
    },

    /// A ray hit could not be attributed to exactly one axis.
    #[error("placement needs a single collision axis, got {axes:?}")]
    AmbiguousPlacementAxis {
        /// Axes reported by the hit.
        axes: CollisionAxes,
    },

    /// A scanned region is too far from the origin or too large to walk.
    #[error("swept region {min:?}..{max:?} is out of bounds")]
    RegionOutOfBounds {
        /// Minimum corner of the region.
        min: Point3<f32>,
        /// Maximum corner of the region.
        max: Point3<f32>,
    },

    /// The requested movement has a NaN or infinite component.
    #[error("movement is not finite: {0:?}")]
    NonFiniteMovement(Vector3<f32>),
}
