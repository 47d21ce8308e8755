//! Orbit camera with auto-rotation and damped drag.

use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

/// Yaw/pitch velocity gained per pixel of mouse drag.
const DRAG_SENSITIVITY: f32 = 0.002;

/// Orbit camera for viewing a backdrop.
///
/// The camera circles `target` at `distance`, drifting on its own at
/// [`auto_rotate_speed`](OrbitCamera::auto_rotate_speed). Drag input
/// feeds angular velocity that decays by `damping` each frame, so
/// released drags coast to a stop instead of snapping.
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Passive rotation about the target, radians per second.
    pub auto_rotate_speed: f32,
    /// Fraction of drag velocity shed each frame, 0..1.
    pub damping: f32,
    /// Allowed pitch range; a backdrop locks this to the equator.
    pub pitch_range: (f32, f32),
    yaw_velocity: f32,
    pitch_velocity: f32,
}

impl OrbitCamera {
    /// Create a camera with default backdrop positioning.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 30.0,
            target: Vec3::ZERO,
            fov_y: 75.0_f32.to_radians(),
            auto_rotate_speed: TAU / 300.0,
            damping: 0.1,
            pitch_range: (-1.5, 1.5),
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }

    /// Advance the orbit by one frame: apply auto-rotation and any
    /// remaining drag momentum, then decay the momentum.
    pub fn advance(&mut self, dt: f32) {
        self.yaw += self.auto_rotate_speed * dt + self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity)
            .clamp(self.pitch_range.0, self.pitch_range.1);

        self.yaw_velocity *= 1.0 - self.damping;
        self.pitch_velocity *= 1.0 - self.damping;
    }

    /// Feed a mouse-drag delta in pixels.
    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        self.yaw_velocity -= dx * DRAG_SENSITIVITY;
        self.pitch_velocity += dy * DRAG_SENSITIVITY;
    }

    /// The camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// View matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Projection matrix for the given aspect ratio.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, 0.1, 1000.0)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_position() {
        let camera = OrbitCamera::new();
        let pos = camera.position();
        assert!((pos - Vec3::new(0.0, 0.0, 30.0)).length() < 1e-4);
    }

    #[test]
    fn test_auto_rotation_advances_yaw() {
        let mut camera = OrbitCamera::new();
        let yaw = camera.yaw;
        camera.advance(1.0);
        assert!(camera.yaw > yaw);
    }

    #[test]
    fn test_drag_momentum_decays() {
        let mut camera = OrbitCamera::new();
        camera.apply_drag(100.0, 0.0);
        camera.advance(0.0);
        let first = camera.yaw;
        for _ in 0..200 {
            camera.advance(0.0);
        }
        // Momentum must have died off; yaw moved but stopped moving.
        let settled = camera.yaw;
        camera.advance(0.0);
        assert_ne!(first, settled);
        assert!((camera.yaw - settled).abs() < 1e-4);
    }

    #[test]
    fn test_pitch_locked_range() {
        let mut camera = OrbitCamera::new();
        camera.pitch_range = (0.0, 0.0);
        camera.apply_drag(0.0, 500.0);
        for _ in 0..10 {
            camera.advance(0.016);
        }
        assert_eq!(camera.pitch, 0.0);
    }
}
