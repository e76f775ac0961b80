//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera position and orientation tracking
//! - Player input processing for camera control
//! - Collision-checked position updates
//! - Chunk-based position tracking
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `CameraController`: Collects player actions between updates

use camera::CameraController;
use cgmath::Point3;

use super::{
    collision::{CollisionError, MovementController},
    math::CollisionAxes,
    voxels::{chunk::CHUNK_DIMENSION, chunk_grid::ChunkGrid},
    PlayerAction,
};

pub mod camera;

/// The camera and its controller.
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: camera::Camera,
    /// Handles player input and camera movement
    pub camera_controller: camera::CameraController,
}

impl CameraState {
    /// Creates a camera at `position` looking along +X.
    pub fn new(position: Point3<f32>, speed: f32, sensitivity: f32) -> Self {
        CameraState {
            camera: camera::Camera::new(position, cgmath::Deg(0.0), cgmath::Deg(0.0)),
            camera_controller: CameraController::new(speed, sensitivity),
        }
    }

    /// Processes player input actions and updates the camera controller state.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        self.camera_controller.intake_actions(actions);
    }

    /// Applies pending controller input, moving the camera only as far as
    /// `movement` lets it through `grid`.
    ///
    /// # Returns
    /// - `Some(CameraUpdates)` if the controller had input
    /// - `None` if no updates were needed
    ///
    /// # Errors
    /// Whatever the collision core reports. The camera position is left
    /// where it was, but the view rotation has already been applied and the
    /// controller input is consumed.
    pub fn update<G: ChunkGrid>(
        &mut self,
        dt: web_time::Duration,
        grid: &G,
        movement: &MovementController,
    ) -> Result<Option<CameraUpdates>, CollisionError> {
        if !self.camera_controller.has_updates() {
            return Ok(None);
        }

        let displacement = self
            .camera
            .take_controller_updates(&mut self.camera_controller, dt);
        let response = movement.calculate_movement(grid, self.camera.position, displacement)?;
        self.camera.position = response.new_camera_pos;

        Ok(Some(CameraUpdates {
            collided: response.axes,
            new_chunk_position: chunk_position_of(self.camera.position),
        }))
    }

    /// Chunk the camera is currently in.
    pub fn chunk_position(&self) -> Point3<i32> {
        chunk_position_of(self.camera.position)
    }
}

fn chunk_position_of(position: Point3<f32>) -> Point3<i32> {
    let dimension = CHUNK_DIMENSION as f32;
    Point3::new(
        (position.x / dimension).floor() as i32,
        (position.y / dimension).floor() as i32,
        (position.z / dimension).floor() as i32,
    )
}

/// What changed during `CameraState::update`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraUpdates {
    /// Axes the player ran into
    pub collided: CollisionAxes,
    /// The chunk the camera is in after the update
    pub new_chunk_position: Point3<i32>,
}
