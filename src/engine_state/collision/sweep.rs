//! # Sweep Module
//!
//! Scans every block a swept box can touch and keeps the most relevant
//! impulse.
//!
//! Chunks are visited z, then y, then x, and blocks inside a chunk in the same
//! order, so two scans of the same world give the same answer even when
//! impulses tie.

use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::engine_state::math::{BlockPositionsInBox, ChunkPositionsInBox, AABB3};
use crate::engine_state::voxels::chunk::CHUNK_DIMENSION;
use crate::engine_state::voxels::chunk_grid::ChunkGrid;

use super::impulse::{process_collision, CollisionImpulse};
use super::CollisionError;

/// Largest absolute world coordinate a scanned region may reach.
pub const MAX_GRID_COORDINATE: f32 = 16_777_216.0;

/// Largest size of a scanned region along any axis, in blocks.
pub const MAX_SWEEP_EXTENT: f32 = 256.0;

fn check_region(region: &AABB3) -> Result<(), CollisionError> {
    let (min, max) = (region.min(), region.max());
    let inside = |v: f32| v.abs() <= MAX_GRID_COORDINATE;
    let in_grid = [min.x, min.y, min.z, max.x, max.y, max.z].into_iter().all(inside);
    let small = [max.x - min.x, max.y - min.y, max.z - min.z]
        .into_iter()
        .all(|extent| extent <= MAX_SWEEP_EXTENT);

    if in_grid && small {
        Ok(())
    } else {
        Err(CollisionError::RegionOutOfBounds { min, max })
    }
}

/// What a scan does with a chunk coordinate the grid has no chunk for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingChunkPolicy {
    /// Open space, no diagnostic.
    Ignore,
    /// Open space, with a warning.
    #[default]
    Passable,
    /// Every cell collides like an opaque block.
    Solid,
}

/// The most relevant impulse of a scan and the block that caused it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SweepHit {
    /// The winning impulse.
    pub impulse: CollisionImpulse,
    /// World coordinate of the struck block, `None` for the identity result.
    pub block: Option<Point3<i32>>,
}

impl SweepHit {
    /// Nothing hit: the whole movement is free.
    pub fn none(movement: Vector3<f32>) -> Self {
        SweepHit {
            impulse: CollisionImpulse::none(movement),
            block: None,
        }
    }

    /// Keeps whichever of `self` and `other` is more relevant; `self` on a tie.
    pub fn most_relevant(self, other: SweepHit) -> SweepHit {
        if other.impulse.is_more_relevant_than(&self.impulse) {
            other
        } else {
            self
        }
    }

    /// Whether the hit stops the movement this tick.
    pub fn is_resolvable(&self) -> bool {
        self.impulse.is_resolvable()
    }
}

/// Scans the blocks overlapping `swept_region` for collisions with `moving`
/// travelling by `movement`.
///
/// Chunks below `DataPrepared` are open space. Absent chunks follow `policy`.
///
/// # Errors
/// * `RegionOutOfBounds` if `swept_region` leaves `±MAX_GRID_COORDINATE` or is
///   wider than `MAX_SWEEP_EXTENT` along any axis
/// * `MissingBlock` if a prepared chunk has holes in its block array
pub fn scan<G: ChunkGrid>(
    grid: &G,
    swept_region: &AABB3,
    moving: &AABB3,
    movement: Vector3<f32>,
    policy: MissingChunkPolicy,
) -> Result<SweepHit, CollisionError> {
    check_region(swept_region)?;

    ChunkPositionsInBox::new(swept_region, CHUNK_DIMENSION).try_fold(
        SweepHit::none(movement),
        |best, chunk_position| {
            let mut positions = BlockPositionsInBox::new(swept_region, chunk_position, CHUNK_DIMENSION);
            let origin = positions.chunk_origin();
            let to_world =
                |local: Point3<usize>| origin + Vector3::new(local.x as i32, local.y as i32, local.z as i32);

            let Some(chunk) = grid.chunk_at(chunk_position) else {
                return Ok(match policy {
                    MissingChunkPolicy::Ignore => best,
                    MissingChunkPolicy::Passable => {
                        log::warn!("chunk {:?} is not loaded, treating it as open space", chunk_position);
                        best
                    }
                    MissingChunkPolicy::Solid => positions.fold(best, |best, local| {
                        let block = to_world(local);
                        best.most_relevant(SweepHit {
                            impulse: CollisionImpulse::sweep(&AABB3::unit_cube(block), moving, movement),
                            block: Some(block),
                        })
                    }),
                });
            };

            if !chunk.is_data_prepared() {
                return Ok(best);
            }

            positions.try_fold(best, |best, local| -> Result<SweepHit, CollisionError> {
                let block = chunk.block_at(local).ok_or(CollisionError::MissingBlock {
                    chunk: chunk_position,
                    local,
                })?;
                let coord = to_world(local);
                Ok(best.most_relevant(SweepHit {
                    impulse: process_collision(block, coord, moving, movement),
                    block: Some(coord),
                }))
            })
        },
    )
}
