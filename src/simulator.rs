//! Per-frame particle simulation.
//!
//! [`ParticleSimulator::advance`] does two things, in order:
//!
//! 1. **Emission.** Elapsed time accumulates; once it reaches the emission
//!    interval the accumulator resets and at most one particle is spawned.
//!    A large `dt` spanning several intervals still spawns only one.
//! 2. **Update.** Every live particle integrates gravity and velocity,
//!    interpolates color and size by `t = duration / lifespan`, ages by `dt`,
//!    and dies once its duration reaches the lifespan.
//!
//! Each slot moves through **Dead → Alive → Dead** only; a recycled slot is
//! always re-sampled from scratch.

use crate::config::ParticleConfig;
use crate::emitter::Emitter;
use crate::error::ConfigError;
use crate::math::{lerp_rgb, lerp_scalar};
use crate::pool::{ParticleInit, ParticlePool};
use crate::spawn::SpawnRng;
use crate::sync::DirtyBuffers;

/// Owns a particle pool and drives it from a fixed configuration.
///
/// # Example
///
/// ```ignore
/// let mut sim = ParticleSimulator::new(ParticleConfig::sparks())?;
/// loop {
///     sim.advance(clock.tick());
///     let dirty = sim.take_dirty();
///     renderer.upload(sim.pool(), dirty);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct ParticleSimulator {
    config: ParticleConfig,
    emitter: Emitter,
    pool: ParticlePool,
    rng: SpawnRng,
    time_since_last_emission_ms: f32,
    /// Set after an exhaustion warning, cleared by the next successful spawn.
    exhausted_warned: bool,
}

impl ParticleSimulator {
    /// Build a simulator with an entropy-seeded random source.
    pub fn new(config: ParticleConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SpawnRng::from_entropy())
    }

    /// Build a simulator whose random draws are reproducible.
    pub fn with_seed(config: ParticleConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SpawnRng::seeded(seed))
    }

    fn with_rng(config: ParticleConfig, rng: SpawnRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let emitter = Emitter::from_config(&config)?;
        let pool = ParticlePool::new(config.pool_size as usize);

        log::debug!(
            "particle simulator: {} slots, {} emitter at {} Hz, lifespan {} ms",
            config.pool_size,
            emitter.kind(),
            config.emission_rate_hz,
            config.lifespan_ms
        );

        Ok(Self {
            config,
            emitter,
            pool,
            rng,
            time_since_last_emission_ms: 0.0,
            exhausted_warned: false,
        })
    }

    /// Step the simulation by `dt_ms` milliseconds.
    ///
    /// `dt_ms` must be non-negative and finite.
    pub fn advance(&mut self, dt_ms: f32) {
        self.time_since_last_emission_ms += dt_ms;
        if self.time_since_last_emission_ms >= self.config.emission_interval_ms() {
            self.time_since_last_emission_ms = 0.0;
            self.emit();
        }

        self.update(dt_ms);
    }

    /// Spawn one particle into the lowest free slot.
    ///
    /// Returns the slot used, or `None` when the pool is full.
    fn emit(&mut self) -> Option<usize> {
        let Some(slot) = self.pool.allocate() else {
            if !self.exhausted_warned {
                log::warn!(
                    "particle pool exhausted ({} slots); increase pool size or lower the emission rate",
                    self.pool.capacity()
                );
                self.exhausted_warned = true;
            }
            return None;
        };
        self.exhausted_warned = false;

        let config = &self.config;
        let start_size = self.rng.range(config.min_size0, config.max_size0);
        let end_size = self.rng.range(config.min_size1, config.max_size1);
        let emission = self.emitter.sample(&mut self.rng);

        self.pool.activate(
            slot,
            &ParticleInit {
                position: emission.position,
                velocity: emission.velocity,
                start_size,
                end_size,
                color: config.color0,
            },
        );
        log::trace!("spawned particle in slot {slot}");
        Some(slot)
    }

    fn update(&mut self, dt_ms: f32) {
        let config = &self.config;
        let dt_secs = dt_ms / 1000.0;
        let gravity_step = config.gravity * dt_secs;

        let updated = self.pool.for_each_alive(|mut p| {
            if config.use_gravity {
                *p.velocity += gravity_step;
            }
            *p.position += *p.velocity * dt_secs;

            let t = (*p.duration_ms / config.lifespan_ms).clamp(0.0, 1.0);
            if config.use_color_delta {
                *p.color = lerp_rgb(config.color0, config.color1, t);
            }
            if config.use_size_delta {
                *p.size = lerp_scalar(p.start_size, p.end_size, t);
            }

            *p.duration_ms += dt_ms;
            if *p.duration_ms >= config.lifespan_ms {
                p.deactivate();
            }
        });

        if updated > 0 {
            let mut dirty = DirtyBuffers::POSITIONS;
            dirty.set(DirtyBuffers::COLORS, config.use_color_delta);
            dirty.set(DirtyBuffers::SIZES, config.use_size_delta);
            self.pool.sync_mut().mark(dirty);
        }
    }

    /// Kill every particle and restart the emission timer.
    pub fn reset(&mut self) {
        self.pool.clear();
        self.time_since_last_emission_ms = 0.0;
        self.exhausted_warned = false;
        log::debug!("particle simulator reset");
    }

    /// Return the buffers changed since the last call and clear the flags.
    pub fn take_dirty(&mut self) -> DirtyBuffers {
        self.pool.sync_mut().take()
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.pool.alive_count()
    }

    /// Milliseconds accumulated toward the next emission.
    #[inline]
    pub fn time_since_last_emission_ms(&self) -> f32 {
        self.time_since_last_emission_ms
    }
}
