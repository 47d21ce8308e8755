//! Dense instance-transform storage with an explicit commit.
//!
//! The floater component owns the buffer and rewrites every slot each
//! tick; the renderer only ever reads [`matrices`](TransformBuffer::matrices)
//! and re-uploads when [`take_dirty`](TransformBuffer::take_dirty)
//! reports a completed write pass. The dirty flag is set by one
//! `commit()` after the last slot, never per write, so a reader cannot
//! mistake a half-written pass for a finished frame.

use glam::Mat4;

/// A dense array of per-instance world transforms.
pub struct TransformBuffer {
    transforms: Vec<Mat4>,
    dirty: bool,
}

impl TransformBuffer {
    /// Allocate `len` slots, initialized to identity, not dirty.
    pub fn new(len: usize) -> Self {
        Self {
            transforms: vec![Mat4::IDENTITY; len],
            dirty: false,
        }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Read-only view of the slots.
    #[inline]
    pub fn matrices(&self) -> &[Mat4] {
        &self.transforms
    }

    /// Whether a commit is pending upload.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the dirty flag and clears it. One `true` per commit.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Write the transform at `slot`. Not published until [`commit`](Self::commit).
    pub(crate) fn set(&mut self, slot: usize, transform: Mat4) {
        self.transforms[slot] = transform;
    }

    /// Publish all writes since the last commit.
    pub(crate) fn commit(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_new_is_identity_and_clean() {
        let buffer = TransformBuffer::new(4);
        assert_eq!(buffer.len(), 4);
        assert!(!buffer.is_dirty());
        assert!(buffer.matrices().iter().all(|m| *m == Mat4::IDENTITY));
    }

    #[test]
    fn test_set_does_not_publish() {
        let mut buffer = TransformBuffer::new(2);
        buffer.set(0, Mat4::from_translation(Vec3::X));
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_take_dirty_is_one_shot() {
        let mut buffer = TransformBuffer::new(2);
        buffer.set(0, Mat4::from_translation(Vec3::X));
        buffer.commit();
        assert!(buffer.take_dirty());
        assert!(!buffer.take_dirty());
    }

    #[test]
    fn test_zero_length_buffer() {
        let mut buffer = TransformBuffer::new(0);
        assert!(buffer.is_empty());
        buffer.commit();
        assert!(buffer.take_dirty());
    }
}
