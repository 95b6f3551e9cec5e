//! Emission volumes: where new particles appear and how fast they leave.
//!
//! A [`ParticleConfig`] selects a volume by kind ([`EmissionVolume`]). When the
//! simulator is built the kind is resolved into an [`Emitter`], which carries
//! the numbers it needs and samples a fresh [`Emission`] for every spawn.
//!
//! # Volumes
//!
//! | Kind | Position | Velocity |
//! |------|----------|----------|
//! | [`EmissionVolume::Sphere`] | random direction scaled by `radius * U(0,1]` | random direction scaled by `speed0 * U[0,1)` |
//! | [`EmissionVolume::Cone`] | emitter origin | `(U[-r/2,r/2), 1, U[-r/2,r/2))` normalized, scaled by `speed0 * U[0,1)` |
//! | [`EmissionVolume::Cube`] | unsupported | unsupported |
//! | [`EmissionVolume::Cylinder`] | unsupported | unsupported |
//!
//! Sphere positions concentrate toward the center rather than filling the
//! volume uniformly.

use crate::config::ParticleConfig;
use crate::error::ConfigError;
use crate::spawn::SpawnRng;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Emission volume kind selected in a [`ParticleConfig`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmissionVolume {
    /// Spawn inside a sphere of `radius`, flying in a random direction.
    #[default]
    Sphere,
    /// Declared but has no sampling rule.
    Cube,
    /// Spawn at the origin, flying upward in a cone widened by `radius`.
    Cone,
    /// Declared but has no sampling rule.
    Cylinder,
}

impl EmissionVolume {
    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            EmissionVolume::Sphere => "Sphere",
            EmissionVolume::Cube => "Cube",
            EmissionVolume::Cone => "Cone",
            EmissionVolume::Cylinder => "Cylinder",
        }
    }

    /// Whether [`Emitter::from_config`] can resolve this kind.
    pub fn is_supported(&self) -> bool {
        matches!(self, EmissionVolume::Sphere | EmissionVolume::Cone)
    }
}

impl fmt::Display for EmissionVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Initial state sampled for a newly activated particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emission {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// A resolved emission volume, ready to sample.
#[derive(Clone, Debug, PartialEq)]
pub enum Emitter {
    /// Random point within `radius` of the origin, random direction of travel.
    Sphere {
        /// Maximum distance from the origin.
        radius: f32,
        /// Maximum initial speed.
        speed: f32,
    },
    /// Point emission at the origin, upward cone of travel.
    Cone {
        /// Horizontal spread of the direction vector before normalization.
        radius: f32,
        /// Maximum initial speed.
        speed: f32,
    },
}

impl Emitter {
    /// Resolve the configured volume kind.
    ///
    /// Cube and Cylinder have no sampling rule and are rejected here, before
    /// any particle is spawned.
    pub fn from_config(config: &ParticleConfig) -> Result<Self, ConfigError> {
        match config.emission_volume {
            EmissionVolume::Sphere => Ok(Emitter::Sphere {
                radius: config.radius,
                speed: config.speed0,
            }),
            EmissionVolume::Cone => Ok(Emitter::Cone {
                radius: config.radius,
                speed: config.speed0,
            }),
            kind @ (EmissionVolume::Cube | EmissionVolume::Cylinder) => {
                Err(ConfigError::UnsupportedEmissionVolume(kind))
            }
        }
    }

    /// The volume kind this emitter was resolved from.
    pub fn kind(&self) -> EmissionVolume {
        match self {
            Emitter::Sphere { .. } => EmissionVolume::Sphere,
            Emitter::Cone { .. } => EmissionVolume::Cone,
        }
    }

    /// Sample a starting position and velocity.
    pub fn sample(&self, rng: &mut SpawnRng) -> Emission {
        match *self {
            Emitter::Sphere { radius, speed } => {
                let position = rng.random_direction() * (radius * rng.random_nonzero());
                let velocity = rng.random_direction() * (speed * rng.random());
                Emission { position, velocity }
            }
            Emitter::Cone { radius, speed } => {
                let half = radius / 2.0;
                let x = rng.random() * radius - half;
                let z = rng.random() * radius - half;
                let dir = SpawnRng::direction_or_up(Vec3::new(x, 1.0, z));
                Emission {
                    position: Vec3::ZERO,
                    velocity: dir * (speed * rng.random()),
                }
            }
        }
    }
}
