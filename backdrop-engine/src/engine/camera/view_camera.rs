use bevy::math::{Dir3, Mat4, Ray3d, Vec2, Vec3};
use constants::render_settings::{CAMERA_DISTANCE, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR};

/// Perspective camera on the +Z axis looking toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCamera {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self {
            fov_y: CAMERA_FOV_DEGREES.to_radians(),
            aspect: 16.0 / 9.0,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            position: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
        }
    }
}

impl ViewCamera {
    /// Track a new viewport size. Zero-sized viewports (minimised windows)
    /// keep the previous aspect.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        let projection = Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far);
        let view = Mat4::from_translation(self.position).inverse();
        projection * view
    }

    /// World-space ray from the eye through a normalised device coordinate.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray3d> {
        let inverse = self.view_projection().inverse();
        let far = inverse.project_point3(ndc.extend(1.0));
        let direction = Dir3::new(far - self.position).ok()?;
        Some(Ray3d::new(self.position, direction))
    }
}
