//! Particle field generation and rotation.
//!
//! A [`ParticleField`] is a fixed cloud of colored points that tumbles
//! rigidly as a whole. Points are generated exactly once per
//! construction (or count change) and never move individually; the only
//! per-frame state is the cloud's rotation, which is assigned from
//! elapsed time rather than accumulated, so the orientation at a given
//! `t` does not depend on tick history or frame rate.

use crate::spawn::SpawnContext;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Rotation rate about the cloud's local X axis, radians per elapsed second.
const X_RATE: f32 = 0.05;
/// Rotation rate about the cloud's local Y axis, radians per elapsed second.
const Y_RATE: f32 = 0.075;

/// Configuration for a [`ParticleField`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldConfig {
    /// Number of points in the cloud.
    pub count: usize,
    /// Half-extent of the spawn cube; each position coordinate is sampled
    /// uniformly in `-half_extent..half_extent`.
    pub half_extent: f32,
    /// Seed for the spawn RNG.
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            half_extent: 100.0,
            seed: 0,
        }
    }
}

/// One point of the cloud: a fixed position and color.
///
/// Colors sit on a purple-to-blue ramp driven by a single random blend
/// factor `t` per point: `(0.5 + 0.5t, 0.3 + 0.4t, 1.0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePoint {
    pub position: Vec3,
    pub color: Vec3,
}

/// Scene-side handle for the cloud; present only while attached.
#[derive(Clone, Copy, Debug, Default)]
struct Cloud {
    rotation: Vec3,
}

/// A fixed cloud of colored points that tumbles slowly over time.
///
/// The cloud must be [`attach`](ParticleField::attach)ed before frame
/// ticks have any effect; ticks on a detached field are silent no-ops.
pub struct ParticleField {
    config: FieldConfig,
    points: Vec<ParticlePoint>,
    cloud: Option<Cloud>,
}

impl ParticleField {
    /// Generate a new field. Sampling happens here, exactly once.
    pub fn new(config: FieldConfig) -> Self {
        let points = generate(&config);
        Self {
            config,
            points,
            cloud: None,
        }
    }

    /// The generated points. Immutable for the life of the field.
    #[inline]
    pub fn points(&self) -> &[ParticlePoint] {
        &self.points
    }

    /// Number of points in the cloud.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Install the cloud into the scene. Until this is called, frame
    /// ticks are skipped.
    pub fn attach(&mut self) {
        if self.cloud.is_none() {
            self.cloud = Some(Cloud::default());
        }
    }

    /// Remove the cloud from the scene, dropping its rotation state.
    pub fn detach(&mut self) {
        self.cloud = None;
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.cloud.is_some()
    }

    /// Frame tick. `t` is elapsed seconds since the host clock started.
    ///
    /// The rotation is an absolute assignment, never an increment, so
    /// calling this at `t` any number of times yields the same
    /// orientation.
    pub fn update(&mut self, t: f32) {
        let Some(cloud) = self.cloud.as_mut() else {
            return;
        };
        cloud.rotation = Vec3::new(X_RATE * t, Y_RATE * t, 0.0);
    }

    /// Current cloud rotation in radians about (X, Y, Z), if attached.
    #[inline]
    pub fn rotation(&self) -> Option<Vec3> {
        self.cloud.map(|c| c.rotation)
    }

    /// Model matrix for the cloud. Identity while detached.
    pub fn rotation_matrix(&self) -> Mat4 {
        match self.cloud {
            Some(c) => Mat4::from_quat(Quat::from_euler(
                EulerRot::XYZ,
                c.rotation.x,
                c.rotation.y,
                c.rotation.z,
            )),
            None => Mat4::IDENTITY,
        }
    }

    /// Drop all points and resample `count` fresh ones from the seed.
    ///
    /// Nothing is preserved for overlapping indices; the new set is what
    /// `new` would have produced with this count.
    pub fn set_count(&mut self, count: usize) {
        self.config.count = count;
        self.points = generate(&self.config);
    }
}

fn generate(config: &FieldConfig) -> Vec<ParticlePoint> {
    (0..config.count)
        .map(|i| {
            let mut ctx = SpawnContext::new(i, config.count, config.seed);
            let position = ctx.random_in_cube(config.half_extent);
            let t = ctx.random();
            ParticlePoint {
                position,
                color: Vec3::new(0.5 + 0.5 * t, 0.3 + 0.4 * t, 1.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_count() {
        for count in [0, 1, 2000] {
            let field = ParticleField::new(FieldConfig {
                count,
                ..Default::default()
            });
            assert_eq!(field.len(), count);
        }
    }

    #[test]
    fn test_positions_within_extent() {
        let field = ParticleField::new(FieldConfig {
            count: 500,
            half_extent: 100.0,
            seed: 1,
        });
        for point in field.points() {
            for coord in point.position.to_array() {
                assert!((-100.0..100.0).contains(&coord));
            }
        }
    }

    #[test]
    fn test_color_ramp_channels() {
        let field = ParticleField::new(FieldConfig {
            count: 500,
            ..Default::default()
        });
        for point in field.points() {
            assert!(point.color.x >= 0.5 && point.color.x < 1.0);
            assert!(point.color.y >= 0.3 && point.color.y < 0.7);
            assert_eq!(point.color.z, 1.0);
        }
    }

    #[test]
    fn test_same_seed_reproduces_cloud() {
        let config = FieldConfig {
            count: 64,
            seed: 42,
            ..Default::default()
        };
        let a = ParticleField::new(config);
        let b = ParticleField::new(config);
        assert_eq!(a.points(), b.points());
    }

    #[test]
    fn test_different_seed_differs() {
        let a = ParticleField::new(FieldConfig {
            count: 64,
            seed: 1,
            ..Default::default()
        });
        let b = ParticleField::new(FieldConfig {
            count: 64,
            seed: 2,
            ..Default::default()
        });
        assert_ne!(a.points(), b.points());
    }

    #[test]
    fn test_update_before_attach_is_noop() {
        let mut field = ParticleField::new(FieldConfig::default());
        field.update(10.0);
        assert_eq!(field.rotation(), None);
        assert_eq!(field.rotation_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_rotation_at_ten_seconds() {
        let mut field = ParticleField::new(FieldConfig::default());
        field.attach();
        field.update(10.0);
        assert_eq!(field.rotation(), Some(Vec3::new(0.5, 0.75, 0.0)));
    }

    #[test]
    fn test_rotation_is_absolute_not_accumulated() {
        let mut stepped = ParticleField::new(FieldConfig::default());
        stepped.attach();
        stepped.update(2.0);
        stepped.update(5.0);
        stepped.update(10.0);

        let mut direct = ParticleField::new(FieldConfig::default());
        direct.attach();
        direct.update(10.0);

        assert_eq!(stepped.rotation(), direct.rotation());
    }

    #[test]
    fn test_detach_drops_rotation_state() {
        let mut field = ParticleField::new(FieldConfig::default());
        field.attach();
        field.update(10.0);
        field.detach();
        assert_eq!(field.rotation(), None);

        // Re-derived on the next tick after re-attach.
        field.attach();
        field.update(4.0);
        assert_eq!(field.rotation(), Some(Vec3::new(0.2, 0.3, 0.0)));
    }

    #[test]
    fn test_set_count_resamples_from_seed() {
        let mut field = ParticleField::new(FieldConfig {
            count: 100,
            seed: 9,
            ..Default::default()
        });
        field.set_count(10);
        assert_eq!(field.len(), 10);

        let fresh = ParticleField::new(FieldConfig {
            count: 10,
            seed: 9,
            ..Default::default()
        });
        assert_eq!(field.points(), fresh.points());
    }
}
