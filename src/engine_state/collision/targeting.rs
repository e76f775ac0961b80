//! # Targeting Module
//!
//! Look-ray queries: which block the player points at, which face of it,
//! and which cell a new block would be placed into.
//!
//! The ray is swept as a zero-size box, so it shares the block evaluator with
//! movement. Absent chunks are open space and produce no diagnostics.

use cgmath::Point3;

use crate::engine_state::math::Line3;
use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::engine_state::voxels::chunk_grid::ChunkGrid;

use super::sweep::{scan, MissingChunkPolicy, SweepHit};
use super::CollisionError;

fn cast<G: ChunkGrid>(grid: &G, look: &Line3) -> Result<Option<(Point3<i32>, SweepHit)>, CollisionError> {
    let moving = look.origin_box();
    let hit = scan(grid, &moving.swept(look.span), &moving, look.span, MissingChunkPolicy::Ignore)?;
    if !hit.is_resolvable() {
        return Ok(None);
    }
    Ok(hit.block.map(|block| (block, hit)))
}

/// The first opaque block `look` strikes, if any.
pub fn find_pointing_block<G: ChunkGrid>(grid: &G, look: &Line3) -> Result<Option<Point3<i32>>, CollisionError> {
    Ok(cast(grid, look)?.map(|(block, _)| block))
}

/// The first opaque block `look` strikes and the face it enters through.
///
/// # Errors
/// `AmbiguousPlacementAxis` if the hit does not name exactly one axis.
pub fn find_pointing_face<G: ChunkGrid>(
    grid: &G,
    look: &Line3,
) -> Result<Option<(Point3<i32>, BlockSide)>, CollisionError> {
    let Some((block, hit)) = cast(grid, look)? else {
        return Ok(None);
    };
    let axes = hit.impulse.axes;
    let axis = axes
        .single_axis()
        .ok_or(CollisionError::AmbiguousPlacementAxis { axes })?;
    Ok(Some((block, BlockSide::struck_by(axis, axis.component(look.span)))))
}

/// The cell in front of the struck face, where a new block would be placed.
pub fn find_adding_block<G: ChunkGrid>(grid: &G, look: &Line3) -> Result<Option<Point3<i32>>, CollisionError> {
    Ok(find_pointing_face(grid, look)?.map(|(block, side)| block + side.normal()))
}
