//! # Camera Implementation
//!
//! The first-person camera carried by the player. Its position is the player's eye
//! point, which is the reference for all collision math; the orientation only feeds
//! the view matrix handed to a renderer.

use cgmath::*;
use std::f32::consts::FRAC_PI_2;

/// Safe limit for pitch to prevent gimbal lock
const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// Represents a first-person camera in 3D space.
///
/// # Fields
/// - `position`: The eye point in world space
/// - `yaw`: Horizontal rotation (around Y axis) in radians
/// - `pitch`: Vertical rotation (around X axis) in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The eye point in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation (around X axis) in radians
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial eye point. Can be any type that converts to `Point3<f32>`.
    /// * `yaw` - Initial yaw. Can be any type that converts to `Rad<f32>`.
    /// * `pitch` - Initial pitch, clamped short of straight up or down.
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use voxel_explorer::Camera;
    ///
    /// let camera = Camera::new(Point3::new(0.0, 64.0, 0.0), Deg(0.0), Deg(0.0));
    /// assert_eq!(camera.eye(), Point3::new(0.0, 64.0, 0.0));
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let pitch: Rad<f32> = pitch.into();
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: Rad(pitch.0.clamp(-SAFE_FRAC_PI_2, SAFE_FRAC_PI_2)),
        }
    }

    /// The eye point.
    pub fn eye(&self) -> Point3<f32> {
        self.position
    }

    /// Moves the eye point by `offset`.
    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.position += offset;
    }

    /// Gets the camera's forward direction vector.
    pub fn get_view_vec(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// Calculates the view matrix for this camera.
    ///
    /// The view matrix transforms world coordinates to view (camera) space.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.get_view_vec(), Vector3::unit_y())
    }
}
