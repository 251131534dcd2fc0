//! Free-look camera
//!
//! Holds the camera's position and orientation and composes the
//! view-projection matrix handed to the external shading layer. Input
//! handling (keyboard/mouse) lives in the window layer, which drives this
//! type through the movement and rotation methods.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Tunable camera parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Movement speed in units per second.
    pub speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 45.0,
            near_plane: 0.1,
            far_plane: 100.0,
            speed: 5.0,
        }
    }
}

/// A free-look camera described by a position and a forward orientation
/// vector.
#[derive(Debug, Clone)]
pub struct Camera {
    pub config: CameraConfig,
    pub position: Vec3,
    /// Normalized view direction.
    pub orientation: Vec3,
    pub up: Vec3,
}

impl Camera {
    /// Create a camera at `position` looking down negative Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            config: CameraConfig::default(),
            position,
            orientation: -Vec3::Z,
            up: Vec3::Y,
        }
    }

    /// View matrix looking from the camera position along its orientation.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.orientation, self.up)
    }

    /// OpenGL-convention perspective projection for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.config.fov_deg.to_radians(),
            aspect,
            self.config.near_plane,
            self.config.far_plane,
        )
    }

    /// Combined projection * view matrix.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// The camera's right direction.
    pub fn right(&self) -> Vec3 {
        self.orientation.cross(self.up).normalize()
    }

    /// Move along the view direction.
    pub fn advance(&mut self, amount: f32) {
        self.position += self.orientation * amount;
    }

    /// Move along the right direction.
    pub fn strafe(&mut self, amount: f32) {
        self.position += self.right() * amount;
    }

    /// Move along the up direction.
    pub fn ascend(&mut self, amount: f32) {
        self.position += self.up * amount;
    }

    /// Rotate the orientation by the given yaw and pitch (radians). Pitch is
    /// rejected when it would bring the view within ~5 degrees of the poles.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        let pitched = Quat::from_axis_angle(self.right(), pitch) * self.orientation;
        let limit = 5.0_f32.to_radians();
        if pitched.angle_between(self.up) > limit && pitched.angle_between(-self.up) > limit {
            self.orientation = pitched;
        }
        self.orientation = (Quat::from_axis_angle(self.up, yaw) * self.orientation).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_matrix_moves_camera_to_origin() {
        let camera = Camera::new(Vec3::new(3.0, 2.0, 1.0));
        let eye = camera.view_matrix().transform_point3(camera.position);
        assert!(eye.length() < 1e-5);
    }

    #[test]
    fn advance_follows_orientation() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.advance(2.0);
        assert!((camera.position - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-6);
    }

    #[test]
    fn pitch_is_clamped_near_the_poles() {
        let mut camera = Camera::new(Vec3::ZERO);
        for _ in 0..100 {
            camera.rotate(0.0, 0.1);
        }
        let angle = camera.orientation.angle_between(Vec3::Y);
        assert!(angle >= 4.9_f32.to_radians());
    }
}
