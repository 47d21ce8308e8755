//! Backdrop composition.
//!
//! A [`Backdrop`] owns both generators, the camera, and the lighting,
//! and drives them in a fixed per-frame order. Use method chaining to
//! configure, then call `.run()` to open a window - or step the scene
//! manually with [`Backdrop::update`] from an existing loop.
//!
//! ```ignore
//! use driftfield::Backdrop;
//!
//! fn main() -> Result<(), driftfield::BackdropError> {
//!     Backdrop::new()
//!         .with_particle_count(1500)
//!         .with_floater_count(30)
//!         .with_seed(7)
//!         .run()
//! }
//! ```

use crate::camera::OrbitCamera;
use crate::error::BackdropError;
use crate::field::{FieldConfig, ParticleField};
use crate::floaters::{FloaterConfig, FloaterField};
use crate::window::App;
use glam::Vec3;
use winit::event_loop::{ControlFlow, EventLoop};

/// Scene lighting fed to the render pipelines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    /// Ambient term, 0..1.
    pub ambient: f32,
    /// Direction toward the key light; normalized before upload.
    pub direction: Vec3,
    /// Key light intensity.
    pub intensity: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: 0.2,
            direction: Vec3::new(10.0, 10.0, 5.0),
            intensity: 0.5,
        }
    }
}

/// An ambient background scene: particle field, floaters, camera,
/// lighting.
pub struct Backdrop {
    field: ParticleField,
    floaters: FloaterField,
    camera: OrbitCamera,
    lighting: Lighting,
}

impl Backdrop {
    /// Create a backdrop with the default composition: 1500 particles,
    /// 30 floaters, camera 30 units out on the equator.
    pub fn new() -> Self {
        let mut camera = OrbitCamera::new();
        // The backdrop only ever drifts horizontally.
        camera.pitch_range = (0.0, 0.0);

        Self {
            field: ParticleField::new(FieldConfig {
                count: 1500,
                ..Default::default()
            }),
            floaters: FloaterField::new(FloaterConfig {
                count: 30,
                ..Default::default()
            }),
            camera,
            lighting: Lighting::default(),
        }
    }

    /// Set the particle count. Regenerates the cloud.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.field.set_count(count);
        self
    }

    /// Set the floater count. Regenerates the instances.
    pub fn with_floater_count(mut self, count: usize) -> Self {
        self.floaters.set_count(count);
        self
    }

    /// Seed both generators and regenerate their element sets.
    pub fn with_seed(mut self, seed: u64) -> Self {
        let field_config = FieldConfig {
            seed,
            ..*self.field.config()
        };
        self.field = ParticleField::new(field_config);

        let floater_config = FloaterConfig {
            seed,
            ..*self.floaters.config()
        };
        self.floaters = FloaterField::new(floater_config);
        self
    }

    /// Replace the lighting.
    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    /// Replace the camera.
    pub fn with_camera(mut self, camera: OrbitCamera) -> Self {
        self.camera = camera;
        self
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[inline]
    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    #[inline]
    pub fn floaters(&self) -> &FloaterField {
        &self.floaters
    }

    #[inline]
    pub fn floaters_mut(&mut self) -> &mut FloaterField {
        &mut self.floaters
    }

    #[inline]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    #[inline]
    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    /// Install both generators into the scene.
    pub fn attach(&mut self) {
        self.field.attach();
        self.floaters.attach();
    }

    /// Remove both generators from the scene.
    pub fn detach(&mut self) {
        self.field.detach();
        self.floaters.detach();
    }

    /// Per-frame update with elapsed time `t` and frame delta `dt`, both
    /// in seconds.
    ///
    /// Floater rotations accumulate and transforms commit before the
    /// camera advances; each generator skips silently while detached.
    pub fn update(&mut self, t: f32, dt: f32) {
        self.field.update(t);
        self.floaters.update(t);
        self.camera.advance(dt);
    }

    /// Open a window and run until it is closed. Blocks.
    pub fn run(self) -> Result<(), BackdropError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;
        app.into_error().map_or(Ok(()), Err)
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_default_composition() {
        let backdrop = Backdrop::new();
        assert_eq!(backdrop.field().len(), 1500);
        assert_eq!(backdrop.floaters().len(), 30);
        assert_eq!(backdrop.camera().distance, 30.0);
        assert_eq!(backdrop.camera().pitch_range, (0.0, 0.0));
    }

    #[test]
    fn test_builder_counts_and_seed() {
        let backdrop = Backdrop::new()
            .with_particle_count(10)
            .with_floater_count(4)
            .with_seed(5);
        assert_eq!(backdrop.field().len(), 10);
        assert_eq!(backdrop.floaters().len(), 4);
        assert_eq!(backdrop.field().config().seed, 5);
        assert_eq!(backdrop.floaters().config().seed, 5);
    }

    #[test]
    fn test_update_detached_is_noop() {
        let mut backdrop = Backdrop::new().with_particle_count(4).with_floater_count(2);
        backdrop.update(5.0, 0.016);
        assert_eq!(backdrop.field().rotation(), None);
        assert!(backdrop.floaters().buffer().is_none());
    }

    #[test]
    fn test_update_drives_both_generators() {
        let mut backdrop = Backdrop::new().with_particle_count(4).with_floater_count(2);
        backdrop.attach();
        backdrop.update(10.0, 0.016);

        assert_eq!(
            backdrop.field().rotation(),
            Some(Vec3::new(0.5, 0.75, 0.0))
        );
        assert!(backdrop.floaters_mut().take_dirty());
    }
}
