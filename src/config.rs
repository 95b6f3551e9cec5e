//! Particle effect configuration.
//!
//! A [`ParticleConfig`] is handed to [`ParticleSimulator::new`](crate::ParticleSimulator::new)
//! once and never changes afterwards. It can be built in code with the
//! chainable `with_*` methods, started from a preset, or loaded from JSON.
//!
//! # Example
//!
//! ```ignore
//! let config = ParticleConfig::sparks()
//!     .with_pool_size(500)
//!     .with_emission_rate_hz(120.0);
//! let mut sim = ParticleSimulator::new(config)?;
//! ```
//!
//! # JSON
//!
//! Missing fields take their default value, so a file only needs the
//! settings it changes:
//!
//! ```json
//! { "emission_volume": "Cone", "use_gravity": true, "speed0": 12.0 }
//! ```

use crate::emitter::{EmissionVolume, Emitter};
use crate::error::ConfigError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Immutable simulation parameters for one particle effect.
///
/// Times are in milliseconds, rates in particles per second, colors are
/// RGB in `0.0..=1.0` stored as `Vec3`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    /// Fixed pool capacity. Never resized.
    pub pool_size: u32,
    /// Time each particle stays alive.
    pub lifespan_ms: f32,

    /// Where new particles appear.
    pub emission_volume: EmissionVolume,
    /// Particles spawned per second.
    pub emission_rate_hz: f32,
    /// Spatial extent of the emission volume.
    pub radius: f32,

    /// Interpolate from `color0` to `color1` over the lifespan.
    pub use_color_delta: bool,
    pub color0: Vec3,
    pub color1: Vec3,

    /// Interpolate from the start size to the end size over the lifespan.
    pub use_size_delta: bool,
    pub min_size0: f32,
    pub max_size0: f32,
    pub min_size1: f32,
    pub max_size1: f32,

    /// Maximum initial speed.
    pub speed0: f32,
    /// Apply `gravity` as a constant acceleration.
    pub use_gravity: bool,
    pub gravity: Vec3,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            pool_size: 1000,
            lifespan_ms: 5000.0,
            emission_volume: EmissionVolume::Sphere,
            emission_rate_hz: 20.0,
            radius: 5.0,
            use_color_delta: false,
            color0: Vec3::ONE,
            color1: Vec3::ZERO,
            use_size_delta: false,
            min_size0: 10.0,
            max_size0: 50.0,
            min_size1: 1.0,
            max_size1: 5.0,
            speed0: 30.0,
            use_gravity: false,
            gravity: Vec3::new(0.0, -9.8, 0.0),
        }
    }
}

impl ParticleConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // PRESETS
    // =========================================================================

    /// Sparks: a fast upward cone of hot particles that fall, darken and shrink.
    pub fn sparks() -> Self {
        Self {
            pool_size: 400,
            lifespan_ms: 1200.0,
            emission_volume: EmissionVolume::Cone,
            emission_rate_hz: 200.0,
            radius: 1.5,
            use_color_delta: true,
            color0: Vec3::new(1.0, 0.9, 0.4), // White-yellow
            color1: Vec3::new(0.6, 0.1, 0.0), // Dull red
            use_size_delta: true,
            min_size0: 4.0,
            max_size0: 8.0,
            min_size1: 0.5,
            max_size1: 1.0,
            speed0: 40.0,
            use_gravity: true,
            gravity: Vec3::new(0.0, -30.0, 0.0),
        }
    }

    /// Smoke: slow particles from a sphere that grow and fade to black.
    pub fn smoke() -> Self {
        Self {
            pool_size: 300,
            lifespan_ms: 6000.0,
            emission_volume: EmissionVolume::Sphere,
            emission_rate_hz: 40.0,
            radius: 2.0,
            use_color_delta: true,
            color0: Vec3::splat(0.5),
            color1: Vec3::ZERO,
            use_size_delta: true,
            min_size0: 10.0,
            max_size0: 20.0,
            min_size1: 40.0,
            max_size1: 80.0,
            speed0: 3.0,
            use_gravity: true,
            gravity: Vec3::new(0.0, 1.5, 0.0), // Buoyancy
        }
    }

    // =========================================================================
    // BUILDER
    // =========================================================================

    /// Set the fixed pool capacity.
    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Set how long each particle lives, in milliseconds.
    pub fn with_lifespan_ms(mut self, lifespan_ms: f32) -> Self {
        self.lifespan_ms = lifespan_ms;
        self
    }

    /// Set the emission volume kind.
    pub fn with_emission_volume(mut self, volume: EmissionVolume) -> Self {
        self.emission_volume = volume;
        self
    }

    /// Set the number of particles spawned per second.
    pub fn with_emission_rate_hz(mut self, rate: f32) -> Self {
        self.emission_rate_hz = rate;
        self
    }

    /// Set the spatial extent of the emission volume.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Enable color interpolation from `start` to `end`.
    pub fn with_color_delta(mut self, start: Vec3, end: Vec3) -> Self {
        self.use_color_delta = true;
        self.color0 = start;
        self.color1 = end;
        self
    }

    /// Set a constant color without interpolation.
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.use_color_delta = false;
        self.color0 = color;
        self
    }

    /// Set the random start size range without enabling interpolation.
    pub fn with_start_size(mut self, min: f32, max: f32) -> Self {
        self.min_size0 = min;
        self.max_size0 = max;
        self
    }

    /// Enable size interpolation between two randomized ranges.
    pub fn with_size_delta(mut self, start: (f32, f32), end: (f32, f32)) -> Self {
        self.use_size_delta = true;
        self.min_size0 = start.0;
        self.max_size0 = start.1;
        self.min_size1 = end.0;
        self.max_size1 = end.1;
        self
    }

    /// Set the maximum initial speed.
    pub fn with_speed0(mut self, speed: f32) -> Self {
        self.speed0 = speed;
        self
    }

    /// Enable gravity with the given acceleration (units per second squared).
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.use_gravity = true;
        self.gravity = gravity;
        self
    }

    // =========================================================================
    // VALIDATION & FILES
    // =========================================================================

    /// Time between emissions in milliseconds.
    #[inline]
    pub fn emission_interval_ms(&self) -> f32 {
        1000.0 / self.emission_rate_hz
    }

    /// Check the fields the simulator depends on.
    ///
    /// Size and color ranges are not cross-checked; reversed ranges produce
    /// odd-looking but harmless output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::InvalidPoolSize);
        }
        if !(self.lifespan_ms.is_finite() && self.lifespan_ms > 0.0) {
            return Err(ConfigError::InvalidLifespan(self.lifespan_ms));
        }
        if !(self.emission_rate_hz.is_finite() && self.emission_rate_hz > 0.0) {
            return Err(ConfigError::InvalidEmissionRate(self.emission_rate_hz));
        }
        Emitter::from_config(self).map(|_| ())
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    ///
    /// The result is not validated; [`ParticleSimulator::new`](crate::ParticleSimulator::new) does that.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
