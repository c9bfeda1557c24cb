//! Perspective camera shared by both sections.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_Y_DEG, CAMERA_NEAR};
use crate::viewport::Viewport;
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera on the +Z axis at `distance`, looking at the origin.
    pub fn looking_at_origin(distance: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_Y_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Match the window's CSS size. Empty sizes keep the previous aspect.
    pub fn resize(&mut self, viewport: &Viewport) {
        if let Some(aspect) = viewport.aspect() {
            self.aspect = aspect;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
