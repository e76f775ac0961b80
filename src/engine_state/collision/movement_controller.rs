//! # Movement Controller Module
//!
//! Resolves a desired displacement of the player box into the displacement
//! the block grid allows.
//!
//! Each iteration sweeps the box along the movement still outstanding. When
//! a block is in the way the box advances to the contact plane, the collided
//! axis is dropped from the outstanding movement and the rest is swept again.
//! That is what makes the box slide along walls and floors instead of
//! stopping dead.
//!
//! Every resolvable contact removes one axis, so a well-formed world resolves
//! in at most three iterations; the cap only guards against broken input.

use cgmath::{Point3, Vector3};

use crate::config::PhysicsConfig;
use crate::engine_state::math::{chess_distance, is_finite, CollisionAxes, AABB3};
use crate::engine_state::voxels::chunk_grid::ChunkGrid;

use super::impulse::CollisionImpulse;
use super::sweep::{scan, MissingChunkPolicy};
use super::CollisionError;

/// Default bound on resolution iterations per movement.
pub const MAX_RESOLUTION_ITERATIONS: usize = 100;

/// Result of resolving one movement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovementResponse {
    /// Every axis that collided during the resolution.
    pub axes: CollisionAxes,
    /// Camera position after the permitted displacement.
    pub new_camera_pos: Point3<f32>,
    /// Sweep iterations used.
    pub iterations: usize,
}

impl MovementResponse {
    /// Whether anything was hit.
    pub fn collided(&self) -> bool {
        !self.axes.is_empty()
    }
}

/// In-flight state of one resolution.
#[derive(Copy, Clone, Debug)]
struct Resolution {
    position: Point3<f32>,
    outstanding: Vector3<f32>,
    axes: CollisionAxes,
    iterations: usize,
}

impl Resolution {
    fn start(position: Point3<f32>, movement: Vector3<f32>) -> Self {
        Resolution {
            position,
            outstanding: movement,
            axes: CollisionAxes::NONE,
            iterations: 0,
        }
    }

    fn is_settled(&self) -> bool {
        chess_distance(self.outstanding, Vector3::new(0.0, 0.0, 0.0)) == 0.0
    }

    fn advance(self, impulse: &CollisionImpulse) -> Self {
        let iterations = self.iterations + 1;
        if !impulse.is_resolvable() {
            return Resolution {
                position: self.position + self.outstanding,
                outstanding: Vector3::new(0.0, 0.0, 0.0),
                iterations,
                ..self
            };
        }

        Resolution {
            position: self.position + impulse.collision_free,
            outstanding: impulse.outstanding,
            axes: self.axes | impulse.axes,
            iterations,
        }
    }

    fn into_response(self) -> MovementResponse {
        MovementResponse {
            axes: self.axes,
            new_camera_pos: self.position,
            iterations: self.iterations,
        }
    }
}

/// Moves the player box through the block grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovementController {
    /// Player bounds relative to the camera position.
    pub player_box: AABB3,
    /// Iteration cap per movement.
    pub max_iterations: usize,
    /// Handling of chunks the grid does not have.
    pub missing_chunks: MissingChunkPolicy,
}

impl MovementController {
    /// A controller with the default iteration cap and missing-chunk policy.
    pub fn new(player_box: AABB3) -> Self {
        MovementController {
            player_box,
            max_iterations: MAX_RESOLUTION_ITERATIONS,
            missing_chunks: MissingChunkPolicy::default(),
        }
    }

    /// A controller with the player box, cap and policy of `config`.
    pub fn from_config(config: &PhysicsConfig) -> Self {
        MovementController {
            player_box: config.player_box(),
            max_iterations: config.max_resolution_iterations,
            missing_chunks: config.missing_chunks,
        }
    }

    /// Replaces the iteration cap.
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        MovementController { max_iterations, ..self }
    }

    /// Replaces the missing-chunk policy.
    pub fn with_missing_chunks(self, missing_chunks: MissingChunkPolicy) -> Self {
        MovementController { missing_chunks, ..self }
    }

    /// The player box placed at `camera_pos`.
    pub fn player_box_at(&self, camera_pos: Point3<f32>) -> AABB3 {
        self.player_box + camera_pos
    }

    /// Resolves `movement` of the player box starting at `camera_pos`.
    ///
    /// # Errors
    /// * `NonFiniteMovement` if `movement` has a NaN or infinite component
    /// * `DidNotConverge` if movement is left after `max_iterations` sweeps
    /// * `MissingBlock` if a prepared chunk has holes in its block array
    pub fn calculate_movement<G: ChunkGrid>(
        &self,
        grid: &G,
        camera_pos: Point3<f32>,
        movement: Vector3<f32>,
    ) -> Result<MovementResponse, CollisionError> {
        if !is_finite(movement) {
            return Err(CollisionError::NonFiniteMovement(movement));
        }

        let mut state = Resolution::start(camera_pos, movement);
        while !state.is_settled() {
            if state.iterations >= self.max_iterations {
                return Err(CollisionError::DidNotConverge {
                    iterations: state.iterations,
                    outstanding: state.outstanding,
                });
            }

            let moving = self.player_box_at(state.position);
            let hit = scan(
                grid,
                &moving.swept(state.outstanding),
                &moving,
                state.outstanding,
                self.missing_chunks,
            )?;
            state = state.advance(&hit.impulse);
        }

        if state.iterations > 1 {
            log::debug!(
                "resolved movement {:?} in {} iterations, axes {:?}",
                movement,
                state.iterations,
                state.axes
            );
        }

        Ok(state.into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::engine_state::voxels::block::block_type::BlockType;
    use crate::engine_state::voxels::chunk::Chunk;

    fn controller() -> MovementController {
        MovementController::new(AABB3::new(
            Point3::new(-0.25, -0.25, -0.25),
            Vector3::new(0.5, 0.5, 0.5),
        ))
    }

    fn grid_with(blocks: &[Point3<usize>]) -> HashMap<Point3<i32>, Chunk> {
        let mut chunk = Chunk::empty(&Point3::new(0, 0, 0));
        for block in blocks {
            chunk.set_block_at(*block, BlockType::WOOD);
        }
        HashMap::from([(Point3::new(0, 0, 0), chunk)])
    }

    #[test]
    fn zero_movement_takes_no_iterations() {
        let grid = grid_with(&[]);
        let start = Point3::new(5.5, 5.5, 5.5);
        let response = controller()
            .calculate_movement(&grid, start, Vector3::new(0.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(response.new_camera_pos, start);
        assert_eq!(response.iterations, 0);
        assert!(!response.collided());
    }

    #[test]
    fn free_movement_is_applied_whole() {
        let grid = grid_with(&[]);
        let response = controller()
            .calculate_movement(&grid, Point3::new(5.5, 5.5, 5.5), Vector3::new(1.0, -0.5, 2.0))
            .unwrap();
        assert_eq!(response.new_camera_pos, Point3::new(6.5, 5.0, 7.5));
        assert_eq!(response.axes, CollisionAxes::NONE);
        assert_eq!(response.iterations, 1);
    }

    #[test]
    fn corner_resolves_both_axes() {
        let grid = grid_with(&[Point3::new(6, 5, 5), Point3::new(5, 6, 5)]);
        let response = controller()
            .calculate_movement(&grid, Point3::new(5.5, 5.5, 5.5), Vector3::new(1.0, 1.0, 0.0))
            .unwrap();
        assert_eq!(response.new_camera_pos, Point3::new(5.75, 5.75, 5.5));
        assert_eq!(response.axes, CollisionAxes::X | CollisionAxes::Y);
        assert_eq!(response.iterations, 2);
    }

    #[test]
    fn iteration_cap_is_reported() {
        let grid = grid_with(&[Point3::new(6, 5, 5), Point3::new(5, 6, 5)]);
        let error = controller()
            .with_max_iterations(1)
            .calculate_movement(&grid, Point3::new(5.5, 5.5, 5.5), Vector3::new(1.0, 1.0, 0.0))
            .unwrap_err();
        assert_eq!(
            error,
            CollisionError::DidNotConverge {
                iterations: 1,
                outstanding: Vector3::new(0.0, 0.75, 0.0),
            }
        );
    }

    #[test]
    fn non_finite_movement_is_rejected() {
        let grid = grid_with(&[]);
        let movement = Vector3::new(f32::NAN, 0.0, 0.0);
        let error = controller()
            .calculate_movement(&grid, Point3::new(5.5, 5.5, 5.5), movement)
            .unwrap_err();
        assert!(matches!(error, CollisionError::NonFiniteMovement(_)));
    }

    #[test]
    fn absent_chunk_blocks_movement_when_solid() {
        let grid = grid_with(&[]);
        let start = Point3::new(15.5, 5.5, 5.5);
        let movement = Vector3::new(1.0, 0.0, 0.0);

        let passable = controller().calculate_movement(&grid, start, movement).unwrap();
        assert_eq!(passable.new_camera_pos, Point3::new(16.5, 5.5, 5.5));

        let solid = controller()
            .with_missing_chunks(MissingChunkPolicy::Solid)
            .calculate_movement(&grid, start, movement)
            .unwrap();
        assert_eq!(solid.new_camera_pos, Point3::new(15.75, 5.5, 5.5));
        assert_eq!(solid.axes, CollisionAxes::X);
    }
}
