//! # spark-pool
//!
//! Fixed-capacity particle effects (sparks, smoke, embers) simulated on the
//! CPU, with attribute buffers ready for a renderer to upload.
//!
//! spark-pool owns the simulation only. A driver supplies elapsed time each
//! frame; a renderer reads positions, colors and sizes and re-uploads whichever
//! buffers were flagged dirty.
//!
//! ## Quick Start
//!
//! ```ignore
//! use spark_pool::prelude::*;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = ParticleConfig::new()
//!         .with_pool_size(500)
//!         .with_emission_volume(EmissionVolume::Cone)
//!         .with_color_delta(Vec3::ONE, Vec3::ZERO)
//!         .with_gravity(Vec3::new(0.0, -9.8, 0.0));
//!
//!     let mut sim = ParticleSimulator::new(config)?;
//!     let mut clock = FrameClock::new();
//!     loop {
//!         sim.advance(clock.tick());
//!         let dirty = sim.take_dirty();
//!         if dirty.contains(DirtyBuffers::POSITIONS) {
//!             // upload sim.pool().position_bytes()
//!         }
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Pool
//!
//! [`ParticlePool`] stores every attribute in its own vector, one entry per
//! slot. Capacity is fixed at construction. Dead slots have zero size and
//! black color, so the full buffers can be drawn as is.
//!
//! ### Emission
//!
//! New particles appear at the configured rate, at most one per
//! [`ParticleSimulator::advance`] call. Their starting position and velocity
//! come from the configured [`EmissionVolume`].
//!
//! ### Lifetime
//!
//! A particle's color and size may interpolate from start to end values over
//! its lifespan. When its age reaches the lifespan the slot is recycled.
//!
//! ## Feature Overview
//!
//! | Concern | Items |
//! |---------|-------|
//! | Configuration | [`ParticleConfig`], [`EmissionVolume`] |
//! | Simulation | [`ParticleSimulator`], [`Emitter`] |
//! | Storage | [`ParticlePool`], [`ParticleMut`] |
//! | Render boundary | [`DirtyBuffers`], [`RenderSync`] |
//! | Timing | [`time::FrameClock`] |

mod config;
mod emitter;
mod error;
pub mod math;
mod pool;
mod simulator;
mod spawn;
mod sync;
pub mod time;

pub use bytemuck;
pub use config::ParticleConfig;
pub use emitter::{Emission, EmissionVolume, Emitter};
pub use error::ConfigError;
pub use glam::Vec3;
pub use pool::{ParticleInit, ParticleMut, ParticlePool};
pub use simulator::ParticleSimulator;
pub use spawn::SpawnRng;
pub use sync::{DirtyBuffers, RenderSync};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use spark_pool::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ParticleConfig;
    pub use crate::emitter::{EmissionVolume, Emitter};
    pub use crate::error::ConfigError;
    pub use crate::pool::ParticlePool;
    pub use crate::simulator::ParticleSimulator;
    pub use crate::sync::DirtyBuffers;
    pub use crate::time::FrameClock;
    pub use crate::Vec3;
}
