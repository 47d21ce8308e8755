//! Floating instanced boxes.
//!
//! Each instance drifts around a fixed base position: its rotation
//! accumulates every tick from a per-instance angular velocity, and a
//! vertical offset is re-derived from elapsed time with an index-based
//! phase shift so the ensemble never bobs in lockstep. World transforms
//! land in a dense [`TransformBuffer`] that is committed once per tick,
//! after the last slot is written.

use crate::buffer::TransformBuffer;
use crate::spawn::SpawnContext;
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::f32::consts::PI;

/// Amplitude of the vertical oscillation, world units.
const FLOAT_AMPLITUDE: f32 = 2.0;
/// Phase shift between consecutive instances, radians.
const PHASE_STEP: f32 = 0.1;
/// Half-width of the per-axis rotation speed range, radians per tick.
const MAX_ROTATION_SPEED: f32 = 0.01;

/// Configuration for a [`FloaterField`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloaterConfig {
    /// Number of instances.
    pub count: usize,
    /// Half-extent of the spawn cube for base positions.
    pub half_extent: f32,
    /// Seed for the spawn RNG.
    pub seed: u64,
}

impl Default for FloaterConfig {
    fn default() -> Self {
        Self {
            count: 50,
            half_extent: 50.0,
            seed: 0,
        }
    }
}

/// One drifting box instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloaterInstance {
    /// Fixed base position; the float offset is applied on top each
    /// frame, never folded back in.
    pub position: Vec3,
    /// Accumulated rotation in radians. Grows without bound.
    pub rotation: Vec3,
    /// Per-axis rotation increment applied every tick. Constant for the
    /// instance's lifetime.
    pub rotation_speed: Vec3,
    /// Uniform scale in [0.5, 1.0).
    pub scale: f32,
}

/// A fixed set of independently drifting, rotating box instances.
///
/// [`attach`](FloaterField::attach) allocates the transform buffer;
/// until then frame ticks skip entirely, with no partial writes.
pub struct FloaterField {
    config: FloaterConfig,
    instances: Vec<FloaterInstance>,
    buffer: Option<TransformBuffer>,
}

impl FloaterField {
    /// Generate a new field. Sampling happens here, exactly once.
    pub fn new(config: FloaterConfig) -> Self {
        let instances = generate(&config);
        Self {
            config,
            instances,
            buffer: None,
        }
    }

    /// The instance records, including live rotation accumulators.
    #[inline]
    pub fn instances(&self) -> &[FloaterInstance] {
        &self.instances
    }

    /// Number of instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    #[inline]
    pub fn config(&self) -> &FloaterConfig {
        &self.config
    }

    /// Allocate the dense transform buffer, one slot per instance.
    /// Until this is called, frame ticks are skipped.
    pub fn attach(&mut self) {
        if self.buffer.is_none() {
            self.buffer = Some(TransformBuffer::new(self.instances.len()));
        }
    }

    /// Drop the transform buffer. Rotation accumulators are retained.
    pub fn detach(&mut self) {
        self.buffer = None;
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.buffer.is_some()
    }

    /// The transform buffer, if attached.
    #[inline]
    pub fn buffer(&self) -> Option<&TransformBuffer> {
        self.buffer.as_ref()
    }

    /// One-shot dirty check for the renderer's upload gate.
    pub fn take_dirty(&mut self) -> bool {
        self.buffer.as_mut().map_or(false, |b| b.take_dirty())
    }

    /// Vertical offset for instance `index` at elapsed time `t`.
    ///
    /// Pure function of its arguments; repeated reads at the same `t`
    /// are identical.
    #[inline]
    pub fn float_offset(t: f32, index: usize) -> f32 {
        (t + index as f32 * PHASE_STEP).sin() * FLOAT_AMPLITUDE
    }

    /// Frame tick. `t` is elapsed seconds since the host clock started.
    ///
    /// For each instance in index order: the rotation accumulator
    /// advances by its speed, then the world transform is derived from
    /// `(position + float offset, rotation, scale)` and written to the
    /// instance's slot. The buffer is committed exactly once, after the
    /// last slot.
    pub fn update(&mut self, t: f32) {
        let Some(buffer) = self.buffer.as_mut() else {
            return;
        };
        for (i, instance) in self.instances.iter_mut().enumerate() {
            instance.rotation += instance.rotation_speed;

            let float_y = Self::float_offset(t, i);
            let translation = instance.position + Vec3::new(0.0, float_y, 0.0);
            let orientation = Quat::from_euler(
                EulerRot::XYZ,
                instance.rotation.x,
                instance.rotation.y,
                instance.rotation.z,
            );
            buffer.set(
                i,
                Mat4::from_scale_rotation_translation(
                    Vec3::splat(instance.scale),
                    orientation,
                    translation,
                ),
            );
        }
        buffer.commit();
    }

    /// Drop all instances and resample `count` fresh ones from the seed.
    ///
    /// Rotation accumulators reset with the new set; an attached buffer
    /// is reallocated to the new length. Nothing is preserved for
    /// overlapping indices.
    pub fn set_count(&mut self, count: usize) {
        self.config.count = count;
        self.instances = generate(&self.config);
        if self.buffer.is_some() {
            self.buffer = Some(TransformBuffer::new(count));
        }
    }
}

fn generate(config: &FloaterConfig) -> Vec<FloaterInstance> {
    (0..config.count)
        .map(|i| {
            let mut ctx = SpawnContext::new(i, config.count, config.seed);
            let position = ctx.random_in_cube(config.half_extent);
            let rotation = Vec3::new(
                ctx.random_range(0.0, PI),
                ctx.random_range(0.0, PI),
                ctx.random_range(0.0, PI),
            );
            let scale = ctx.random_range(0.5, 1.0);
            let rotation_speed = Vec3::new(
                ctx.random_range(-MAX_ROTATION_SPEED, MAX_ROTATION_SPEED),
                ctx.random_range(-MAX_ROTATION_SPEED, MAX_ROTATION_SPEED),
                ctx.random_range(-MAX_ROTATION_SPEED, MAX_ROTATION_SPEED),
            );
            FloaterInstance {
                position,
                rotation,
                rotation_speed,
                scale,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(count: usize, seed: u64) -> FloaterField {
        FloaterField::new(FloaterConfig {
            count,
            seed,
            ..Default::default()
        })
    }

    #[test]
    fn test_exact_count() {
        for count in [0, 1, 50] {
            assert_eq!(field(count, 0).len(), count);
        }
    }

    #[test]
    fn test_initial_ranges() {
        let field = field(200, 3);
        for instance in field.instances() {
            for coord in instance.position.to_array() {
                assert!((-50.0..50.0).contains(&coord));
            }
            for axis in instance.rotation.to_array() {
                assert!((0.0..PI).contains(&axis));
            }
            for axis in instance.rotation_speed.to_array() {
                assert!((-MAX_ROTATION_SPEED..MAX_ROTATION_SPEED).contains(&axis));
            }
            assert!((0.5..1.0).contains(&instance.scale));
        }
    }

    #[test]
    fn test_same_seed_reproduces_instances() {
        assert_eq!(field(32, 11).instances(), field(32, 11).instances());
    }

    #[test]
    fn test_update_before_attach_skips_entirely() {
        let mut f = field(8, 0);
        let before = f.instances().to_vec();
        f.update(1.0);
        assert_eq!(f.instances(), before.as_slice());
        assert!(f.buffer().is_none());
        assert!(!f.take_dirty());
    }

    #[test]
    fn test_rotation_accumulates_per_tick() {
        let mut f = field(4, 5);
        f.attach();
        let start = f.instances()[2].rotation;
        let speed = f.instances()[2].rotation_speed;

        f.update(0.5);
        f.update(1.0);
        let expected = start + speed * 2.0;
        let got = f.instances()[2].rotation;
        assert!((got - expected).length() < 1e-6);
    }

    #[test]
    fn test_float_offset_is_pure() {
        let a = FloaterField::float_offset(3.7, 12);
        let b = FloaterField::float_offset(3.7, 12);
        assert_eq!(a, b);
    }

    #[test]
    fn test_float_offset_at_time_zero() {
        assert_eq!(FloaterField::float_offset(0.0, 0), 0.0);
        for i in 0..50 {
            let expected = (i as f32 * 0.1).sin() * 2.0;
            assert!((FloaterField::float_offset(0.0, i) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_commit_is_single_and_one_shot() {
        let mut f = field(4, 5);
        f.attach();
        assert!(!f.take_dirty());
        f.update(0.0);
        assert!(f.take_dirty());
        assert!(!f.take_dirty());
    }

    #[test]
    fn test_transform_derivation() {
        let mut f = field(3, 8);
        f.attach();
        f.update(2.0);

        let instance = f.instances()[1];
        let expected = Mat4::from_scale_rotation_translation(
            Vec3::splat(instance.scale),
            Quat::from_euler(
                EulerRot::XYZ,
                instance.rotation.x,
                instance.rotation.y,
                instance.rotation.z,
            ),
            instance.position + Vec3::new(0.0, FloaterField::float_offset(2.0, 1), 0.0),
        );
        assert_eq!(f.buffer().unwrap().matrices()[1], expected);
    }

    #[test]
    fn test_detach_retains_accumulators() {
        let mut f = field(4, 5);
        f.attach();
        f.update(0.0);
        let rotation = f.instances()[0].rotation;

        f.detach();
        f.update(1.0);
        assert_eq!(f.instances()[0].rotation, rotation);

        f.attach();
        f.update(2.0);
        let expected = rotation + f.instances()[0].rotation_speed;
        assert!((f.instances()[0].rotation - expected).length() < 1e-6);
    }

    #[test]
    fn test_set_count_resets_and_reallocates() {
        let mut f = field(10, 2);
        f.attach();
        f.update(1.0);
        f.set_count(4);

        assert_eq!(f.len(), 4);
        assert_eq!(f.buffer().unwrap().len(), 4);
        assert_eq!(f.instances(), field(4, 2).instances());
    }

    #[test]
    fn test_empty_field_update_commits_cleanly() {
        let mut f = field(0, 0);
        f.attach();
        f.update(1.0);
        assert!(f.take_dirty());
    }
}
