//! # driftfield
//!
//! Ambient 3D backdrops: a slowly tumbling particle field and a set of
//! floating, rotating instanced boxes behind a damped auto-orbiting
//! camera, rendered with wgpu.
//!
//! ## Quick Start
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
//!
//! ## Core Concepts
//!
//! ### Generators
//!
//! Two independent procedural components make up a backdrop:
//!
//! - [`ParticleField`] - a fixed cloud of colored points. The cloud is
//!   generated once and never changes; only its rigid rotation does, and
//!   that rotation is a pure function of elapsed time.
//! - [`FloaterField`] - a fixed set of drifting boxes. Each instance
//!   carries its own rotation accumulator and angular velocity, plus an
//!   index-phased vertical oscillation, and writes its world transform
//!   into a dense [`TransformBuffer`] that is committed once per tick.
//!
//! ### The frame tick
//!
//! Neither generator owns a loop or a timer. The host hands them an
//! elapsed-time value `t` (seconds, monotonically non-decreasing) once
//! per rendered frame via `update(t)`. Ticks that arrive before a
//! generator is attached to the scene are silent no-ops - never errors.
//!
//! ### Attachment
//!
//! `attach()` installs a generator's render target (the point cloud, or
//! the instance transform buffer). Detaching stops all mutation; state
//! that is derived from `t` simply resumes on re-attach.
//!
//! ### Running
//!
//! [`Backdrop`] composes both generators with lighting and an
//! [`OrbitCamera`] and can either open its own window with `run()` or be
//! stepped manually from an existing loop:
//!
//! ```ignore
//! let mut backdrop = Backdrop::new().with_seed(42);
//! backdrop.attach();
//! // in your frame callback, with t/dt from your clock:
//! backdrop.update(t, dt);
//! ```

mod buffer;
mod camera;
pub mod contact;
mod error;
pub mod field;
pub mod floaters;
mod gpu;
mod scene;
pub mod spawn;
pub mod time;
mod window;

pub use buffer::TransformBuffer;
pub use camera::OrbitCamera;
pub use contact::ContactForm;
pub use error::{BackdropError, GpuError};
pub use field::{FieldConfig, ParticleField, ParticlePoint};
pub use floaters::{FloaterConfig, FloaterField, FloaterInstance};
pub use glam::{EulerRot, Mat4, Quat, Vec3};
pub use scene::{Backdrop, Lighting};
pub use spawn::SpawnContext;
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use driftfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::TransformBuffer;
    pub use crate::camera::OrbitCamera;
    pub use crate::contact::ContactForm;
    pub use crate::error::{BackdropError, GpuError};
    pub use crate::field::{FieldConfig, ParticleField, ParticlePoint};
    pub use crate::floaters::{FloaterConfig, FloaterField, FloaterInstance};
    pub use crate::scene::{Backdrop, Lighting};
    pub use crate::time::FrameClock;
    pub use crate::{EulerRot, Mat4, Quat, Vec3};
}
