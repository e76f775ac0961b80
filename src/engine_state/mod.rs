//! # Engine State Module
//!
//! Ties the world, the camera and the collision core together.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Handles camera positioning and movement
//! * `collision` - Swept box collision, movement resolution and targeting
//! * `math` - Boxes, rays and grid iteration
//! * `voxels` - Handles voxel data, chunks, and world generation
//!
//! ## Architecture
//!
//! `EngineState` owns the world behind an `MtResource` and holds its read
//! guard for the whole of a collision query, so no chunk appears or
//! disappears halfway through a resolution. Chunk generation around the
//! player happens between queries under the write guard.

use camera_state::{CameraState, CameraUpdates};
use cgmath::Point3;
use collision::{find_adding_block, find_pointing_block, CollisionError, MovementController};
use voxels::{block::block_type::BlockType, world::World};

use crate::{config::PhysicsConfig, core::MtResource};

use self::collision::COLLISION_EPSILON;
use self::math::AABB3;

pub mod camera_state;
pub mod collision;
pub mod math;
pub mod voxels;

/// The main state container for the engine.
///
/// # Examples
///
/// ```
/// use voxel_collision::engine_state::{EngineState, PlayerAction};
/// use voxel_collision::PhysicsConfig;
/// use web_time::Duration;
///
/// let mut engine_state = EngineState::new(PhysicsConfig::default());
/// engine_state.set_player_actions(PlayerAction {
///     move_forward: true,
///     ..PlayerAction::default()
/// });
/// engine_state.process_input(Duration::from_millis(16));
/// ```
pub struct EngineState {
    /// Camera state managing position, orientation and movement
    pub camera_state: CameraState,
    /// Resolves camera movement against the world
    pub movement_controller: MovementController,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    /// The voxel world containing all chunk data
    pub world: MtResource<World>,
    /// Settings the engine was built from
    pub config: PhysicsConfig,
    /// Current chunk position of the player
    current_player_chunk_position: Point3<i32>,
}

impl EngineState {
    /// Creates the engine and generates the chunks around the spawn point.
    pub fn new(config: PhysicsConfig) -> Self {
        let camera_state = CameraState::new(config.spawn(), config.speed, config.sensitivity);
        let current_player_chunk_position = camera_state.chunk_position();

        let mut world = World::new(config.world.generation);
        world.add_chunks_around(current_player_chunk_position, config.world.radius);
        log::info!(
            "generated {} chunks around {:?} ({:?})",
            world.chunks.len(),
            current_player_chunk_position,
            config.world.generation
        );

        Self {
            camera_state,
            movement_controller: MovementController::from_config(&config),
            player_actions: PlayerAction::default(),
            world: MtResource::new(world),
            config,
            current_player_chunk_position,
        }
    }

    /// Sets the actions to apply on the next `process_input`.
    pub fn set_player_actions(&mut self, actions: PlayerAction) {
        self.player_actions = actions;
    }

    /// Applies the current player actions: moves the camera through the
    /// world, loads chunks around a new player chunk, then places or breaks
    /// a block if asked to.
    ///
    /// Collision failures are logged and leave the camera in place.
    pub fn process_input(&mut self, wait_duration: web_time::Duration) -> Option<CameraUpdates> {
        self.camera_state.intake_actions(&self.player_actions);

        let updates = {
            let world = self.world.get();
            self.camera_state
                .update(wait_duration, &*world, &self.movement_controller)
        };
        let updates = match updates {
            Ok(updates) => updates,
            Err(error) => {
                log::error!("camera update failed: {}", error);
                None
            }
        };

        if let Some(CameraUpdates { new_chunk_position, .. }) = updates {
            if self.current_player_chunk_position != new_chunk_position {
                self.world
                    .get_mut()
                    .add_chunks_around(new_chunk_position, self.config.world.radius);
                self.current_player_chunk_position = new_chunk_position;
            }
        }

        if let Some(block_type) = self.player_actions.place_block {
            if let Err(error) = self.place_block(block_type) {
                log::error!("placing {:?} failed: {}", block_type, error);
            }
        }
        if self.player_actions.break_block {
            if let Err(error) = self.break_block() {
                log::error!("breaking block failed: {}", error);
            }
        }

        updates
    }

    /// The block the camera looks at, within reach.
    pub fn pointing_block(&self) -> Result<Option<Point3<i32>>, CollisionError> {
        let look = self.camera_state.camera.look_line(self.config.reach);
        find_pointing_block(&*self.world.get(), &look)
    }

    /// Places a block against the face the camera looks at.
    ///
    /// Nothing is placed when the target cell overlaps the player or its
    /// chunk is not loaded.
    ///
    /// # Returns
    /// The cell that was filled.
    pub fn place_block(&self, block_type: BlockType) -> Result<Option<Point3<i32>>, CollisionError> {
        let look = self.camera_state.camera.look_line(self.config.reach);
        let world = self.world.get();
        let Some(cell) = find_adding_block(&*world, &look)? else {
            return Ok(None);
        };

        let player = self.movement_controller.player_box_at(self.camera_state.camera.position);
        if block_type.is_opaque() && AABB3::unit_cube(cell).intersects(&player, COLLISION_EPSILON) {
            log::debug!("not placing {:?} at {:?}: player is in the way", block_type, cell);
            return Ok(None);
        }

        Ok(world.set_block_at(cell, block_type).map(|_| cell))
    }

    /// Replaces the block the camera looks at with air.
    ///
    /// # Returns
    /// The cell that was cleared.
    pub fn break_block(&self) -> Result<Option<Point3<i32>>, CollisionError> {
        let look = self.camera_state.camera.look_line(self.config.reach);
        let world = self.world.get();
        let Some(block) = find_pointing_block(&*world, &look)? else {
            return Ok(None);
        };
        Ok(world.set_block_at(block, BlockType::AIR).map(|_| block))
    }

    /// Chunk the player was last seen in.
    pub fn player_chunk_position(&self) -> Point3<i32> {
        self.current_player_chunk_position
    }
}

/// Represents player actions derived from input
///
/// Movement flags hold while set; `place_block` and `break_block` fire on
/// every `process_input` they are set for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerAction {
    /// Walk along the view direction
    pub move_forward: bool,
    /// Walk away from the view direction
    pub move_backward: bool,
    /// Strafe left
    pub move_left: bool,
    /// Strafe right
    pub move_right: bool,
    /// Move along world +Y
    pub move_up: bool,
    /// Move along world -Y
    pub move_down: bool,

    /// View rotation delta
    pub rotate_view: Option<(f64, f64)>,

    /// Block to place against the targeted face
    pub place_block: Option<BlockType>,
    /// Remove the targeted block
    pub break_block: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::ChunkGenerationMethod;
    use crate::engine_state::voxels::block::Block;
    use web_time::Duration;

    fn flat_engine() -> EngineState {
        let mut config = PhysicsConfig::default();
        config.world.generation = ChunkGenerationMethod::Flat { surface_height: 0 };
        config.world.radius = 1;
        EngineState::new(config)
    }

    #[test]
    fn new_engine_generates_chunks_around_spawn() {
        let engine = flat_engine();
        assert_eq!(engine.world.get().chunks.len(), 27);
        assert_eq!(engine.player_chunk_position(), Point3::new(0, 0, 0));
    }

    #[test]
    fn walking_on_flat_ground_keeps_height() {
        let mut engine = flat_engine();
        engine.set_player_actions(PlayerAction {
            move_forward: true,
            move_down: true,
            ..PlayerAction::default()
        });
        let updates = engine.process_input(Duration::from_millis(250)).unwrap();

        assert_eq!(updates.collided, crate::engine_state::math::CollisionAxes::Y);
        assert_eq!(engine.camera_state.camera.position, Point3::new(9.5, 1.5, 8.5));
    }

    #[test]
    fn break_then_place_restores_the_block() {
        let mut engine = flat_engine();
        engine.camera_state.camera = camera_state::camera::Camera::new(
            Point3::new(8.5, 1.5, 8.5),
            cgmath::Deg(0.0),
            cgmath::Deg(-89.0),
        );

        let broken = engine.break_block().unwrap();
        assert_eq!(broken, Some(Point3::new(8, -1, 8)));
        assert_eq!(engine.world.get().block_at(Point3::new(8, -1, 8)), Some(Block::AIR));

        let pointing = engine.pointing_block().unwrap();
        assert_eq!(pointing, Some(Point3::new(8, -2, 8)));
        assert_eq!(engine.place_block(BlockType::WOOD).unwrap(), Some(Point3::new(8, -1, 8)));
    }

    #[test]
    fn placing_into_the_player_is_refused() {
        let mut engine = flat_engine();
        engine.camera_state.camera = camera_state::camera::Camera::new(
            Point3::new(8.5, 0.5, 8.5),
            cgmath::Deg(0.0),
            cgmath::Deg(-89.0),
        );
        engine.movement_controller.player_box =
            AABB3::new(Point3::new(-0.25, -0.5, -0.25), cgmath::Vector3::new(0.5, 1.0, 0.5));
        assert_eq!(engine.place_block(BlockType::DIRT).unwrap(), None);
        assert_eq!(engine.world.get().block_at(Point3::new(8, 0, 8)), Some(Block::AIR));
    }
}
