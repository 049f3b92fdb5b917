//! Orbit-style camera: rotation and distance state plus the per-frame
//! uniform feed consumed by whichever shader program is current.

use glam::{Mat4, Vec3};

const ROTATION_SPEED: f32 = 2.0;
const SCROLL_SPEED: f32 = 0.5;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 10.0;
const DEFAULT_DISTANCE: f32 = 5.0;

const FOV_Y_DEGREES: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

/// Uniform block shared by every shader program.
///
/// Shaders declare the matching GLSL `Globals` block, or omit it entirely;
/// programs are not required to consume every uniform.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub time: f32,
    pub _padding: [f32; 3],
}

/// Camera state mutated by input handlers and read once per frame.
///
/// Rotation accumulates unbounded (wrapped only for display); distance is
/// clamped to `[MIN_DISTANCE, MAX_DISTANCE]`.
#[derive(Debug, Clone)]
pub struct CameraState {
    rotation_x: f32,
    rotation_y: f32,
    distance: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraState {
    pub fn new() -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            distance: DEFAULT_DISTANCE,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// One frame's worth of arrow-key rotation; each direction is -1, 0, or +1.
    pub fn apply_rotation_input(&mut self, x_dir: f32, y_dir: f32) {
        self.rotation_x += x_dir * ROTATION_SPEED;
        self.rotation_y += y_dir * ROTATION_SPEED;
    }

    /// Applies one scroll delta to the camera distance, clamped at the bounds.
    pub fn handle_scroll(&mut self, delta: f32) {
        self.distance = (self.distance - delta * SCROLL_SPEED).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn rotation_x(&self) -> f32 {
        self.rotation_x
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, self.distance), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR)
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation_x.to_radians())
            * Mat4::from_rotation_y(self.rotation_y.to_radians())
    }

    /// Fills the per-frame uniform block for the current program.
    pub fn frame_uniforms(&self, aspect: f32, time: f32) -> FrameUniforms {
        FrameUniforms {
            model: self.model_matrix().to_cols_array_2d(),
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix(aspect).to_cols_array_2d(),
            time,
            _padding: [0.0; 3],
        }
    }
}

/// Wraps an angle in degrees into `[0, 360)` for display.
pub fn normalized_angle(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_clamps_at_min_distance() {
        let mut camera = CameraState::new();
        camera.handle_scroll(100.0);
        assert_eq!(camera.distance(), MIN_DISTANCE);
    }

    #[test]
    fn scroll_clamps_at_max_distance() {
        let mut camera = CameraState::new();
        camera.handle_scroll(-100.0);
        assert_eq!(camera.distance(), MAX_DISTANCE);
    }

    #[test]
    fn scroll_within_bounds_is_additive() {
        let mut camera = CameraState::new();
        camera.handle_scroll(2.0);
        assert_eq!(camera.distance(), 4.0);
        camera.handle_scroll(-1.0);
        assert_eq!(camera.distance(), 4.5);
    }

    #[test]
    fn rotation_accumulates_unbounded() {
        let mut camera = CameraState::new();
        for _ in 0..200 {
            camera.apply_rotation_input(0.0, 1.0);
        }
        assert_eq!(camera.rotation_y(), 400.0);
        assert_eq!(normalized_angle(camera.rotation_y()), 40.0);
    }

    #[test]
    fn angle_wrapping() {
        assert_eq!(normalized_angle(-90.0), 270.0);
        assert_eq!(normalized_angle(360.0), 0.0);
        assert_eq!(normalized_angle(725.0), 5.0);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut camera = CameraState::new();
        camera.apply_rotation_input(1.0, -1.0);
        camera.handle_scroll(3.0);
        camera.reset();
        assert_eq!(camera.rotation_x(), 0.0);
        assert_eq!(camera.rotation_y(), 0.0);
        assert_eq!(camera.distance(), DEFAULT_DISTANCE);
    }
}
