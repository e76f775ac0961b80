//! # Camera Implementation
//!
//! First-person camera and the controller that turns player actions into
//! rotation and a desired displacement.
//!
//! The camera never moves itself: the displacement goes through the
//! collision core first, and only the permitted part is applied.

use cgmath::*;
use std::f32::consts::FRAC_PI_2;
use web_time::Duration;

use crate::engine_state::math::Line3;
use crate::engine_state::PlayerAction;

/// Safe limit for pitch to prevent gimbal lock
const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// Represents a first-person camera in 3D space.
///
/// Yaw 0 looks along +X, positive yaw turns toward +Z.
#[derive(Debug)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation in radians, clamped short of straight up/down
    pub pitch: Rad<f32>,
    /// Normalized vector pointing where the camera looks
    pub view_vec: Vector3<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use voxel_collision::engine_state::camera_state::camera::Camera;
    ///
    /// let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
    /// assert_eq!(camera.get_view_vec().x, 1.0);
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
            view_vec: Vector3::unit_x(),
        };
        camera.update_view_vec();
        camera
    }

    /// Gets the camera's forward direction vector.
    pub fn get_view_vec(&self) -> Vector3<f32> {
        self.view_vec
    }

    /// Look ray of length `reach` from the camera position.
    pub fn look_line(&self, reach: f32) -> Line3 {
        Line3::from_direction(self.position, self.view_vec, reach)
    }

    /// Applies the controller's rotation, resets the controller and returns
    /// the displacement it asks for over `dt`.
    ///
    /// Horizontal movement follows yaw only; up/down is along world Y.
    pub fn take_controller_updates(&mut self, controller: &mut CameraController, dt: Duration) -> Vector3<f32> {
        let dt = dt.as_secs_f32();

        // Rotate
        self.yaw += Rad(controller.rotate_horizontal) * controller.sensitivity * dt;
        self.pitch += Rad(-controller.rotate_vertical) * controller.sensitivity * dt;
        self.pitch = Rad(self.pitch.0.clamp(-SAFE_FRAC_PI_2, SAFE_FRAC_PI_2));
        self.update_view_vec();

        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let forward = Vector3::new(yaw_cos, 0.0, yaw_sin);
        let right = Vector3::new(-yaw_sin, 0.0, yaw_cos);
        let step = controller.speed * dt;

        let displacement = forward * (controller.amount_forward - controller.amount_backward) * step
            + right * (controller.amount_right - controller.amount_left) * step
            + Vector3::unit_y() * (controller.amount_up - controller.amount_down) * step;

        controller.reset();
        displacement
    }

    fn update_view_vec(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        self.view_vec = Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize();
    }
}

/// Handles camera movement and rotation based on player actions.
///
/// Holds the actions of the current frame until the camera consumes them.
#[derive(Debug)]
pub struct CameraController {
    amount_left: f32,
    amount_right: f32,
    amount_forward: f32,
    amount_backward: f32,
    amount_up: f32,
    amount_down: f32,

    rotate_horizontal: f32,
    rotate_vertical: f32,

    speed: f32,
    sensitivity: f32,
}

impl CameraController {
    /// Creates a new camera controller.
    ///
    /// # Arguments
    /// * `speed` - Movement speed in blocks per second
    /// * `sensitivity` - Look sensitivity multiplier
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            amount_left: 0.0,
            amount_right: 0.0,
            amount_forward: 0.0,
            amount_backward: 0.0,
            amount_up: 0.0,
            amount_down: 0.0,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            speed,
            sensitivity,
        }
    }

    /// Records the movement and look actions of this frame.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        let held = |pressed: bool| if pressed { 1.0 } else { 0.0 };
        self.amount_forward = held(actions.move_forward);
        self.amount_backward = held(actions.move_backward);
        self.amount_left = held(actions.move_left);
        self.amount_right = held(actions.move_right);
        self.amount_up = held(actions.move_up);
        self.amount_down = held(actions.move_down);
        if let Some((delta_x, delta_y)) = actions.rotate_view {
            if delta_x.abs() > 0.5 {
                self.rotate_horizontal = delta_x as f32;
            }
            if delta_y.abs() > 0.5 {
                self.rotate_vertical = delta_y as f32;
            }
        }
    }

    /// Whether there is anything for the camera to apply.
    pub fn has_updates(&self) -> bool {
        self.amount_forward > 0.0
            || self.amount_backward > 0.0
            || self.amount_left > 0.0
            || self.amount_right > 0.0
            || self.amount_up > 0.0
            || self.amount_down > 0.0
            || self.rotate_horizontal != 0.0
            || self.rotate_vertical != 0.0
    }

    fn reset(&mut self) {
        *self = Self::new(self.speed, self.sensitivity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_at_zero_yaw_moves_along_x() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        let mut controller = CameraController::new(4.0, 2.0);
        controller.intake_actions(&PlayerAction {
            move_forward: true,
            ..PlayerAction::default()
        });
        assert!(controller.has_updates());

        let displacement = camera.take_controller_updates(&mut controller, Duration::from_millis(250));
        assert_eq!(displacement, Vector3::new(1.0, 0.0, 0.0));
        assert!(!controller.has_updates());
        assert_eq!(camera.position, Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn vertical_movement_ignores_yaw() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(37.0), Deg(10.0));
        let mut controller = CameraController::new(2.0, 1.0);
        controller.intake_actions(&PlayerAction {
            move_down: true,
            ..PlayerAction::default()
        });
        let displacement = camera.take_controller_updates(&mut controller, Duration::from_millis(500));
        assert_eq!(displacement, Vector3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        let mut controller = CameraController::new(1.0, 1.0);
        controller.intake_actions(&PlayerAction {
            rotate_view: Some((0.0, -1000.0)),
            ..PlayerAction::default()
        });
        camera.take_controller_updates(&mut controller, Duration::from_secs(1));
        assert!(camera.pitch.0 <= SAFE_FRAC_PI_2);
        assert!(camera.get_view_vec().y > 0.99);
    }

    #[test]
    fn look_line_has_reach_length() {
        let camera = Camera::new(Point3::new(1.0, 2.0, 3.0), Deg(90.0), Deg(0.0));
        let line = camera.look_line(5.0);
        assert_eq!(line.origin, Point3::new(1.0, 2.0, 3.0));
        assert!((line.span.magnitude() - 5.0).abs() < 1e-4);
        assert!((line.span.z - 5.0).abs() < 1e-4);
    }
}
