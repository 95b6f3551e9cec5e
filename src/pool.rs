//! Fixed-capacity particle storage.
//!
//! The pool is a structure of arrays: slot `i` describes one particle across
//! every attribute vector. The vectors are allocated once, at the configured
//! capacity, and are never resized. Dead slots are kept visually inert
//! (zero size, black, zero duration) so a renderer can draw the whole buffer
//! without consulting the alive flags.
//!
//! # Hidden Fields
//!
//! | Field | Type | Description |
//! |-------|------|-------------|
//! | `start_size` | `f32` | Size sampled at activation |
//! | `end_size` | `f32` | Size reached at the end of the lifespan |
//! | `alive` | `bool` | Whether the slot is in use |
//! | `duration_ms` | `f32` | Time since activation |
//!
//! These are not uploaded for rendering but can be read back per slot.

use crate::sync::{DirtyBuffers, RenderSync};
use glam::Vec3;

/// Initial attributes for a slot being activated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleInit {
    pub position: Vec3,
    pub velocity: Vec3,
    pub start_size: f32,
    pub end_size: f32,
    pub color: Vec3,
}

/// Mutable view of one live slot, handed out by [`ParticlePool::for_each_alive`].
#[derive(Debug)]
pub struct ParticleMut<'a> {
    /// Slot index.
    pub index: usize,
    pub position: &'a mut Vec3,
    pub velocity: &'a mut Vec3,
    pub color: &'a mut Vec3,
    pub size: &'a mut f32,
    pub start_size: f32,
    pub end_size: f32,
    pub duration_ms: &'a mut f32,
    alive: &'a mut bool,
}

impl ParticleMut<'_> {
    /// Kill this particle, consuming the handle so the dead slot stays inert.
    ///
    /// The pool settles its bookkeeping after the callback returns.
    pub fn deactivate(self) {
        *self.alive = false;
        *self.duration_ms = 0.0;
        *self.size = 0.0;
        *self.color = Vec3::ZERO;
    }
}

/// Fixed-size pool of particle slots.
#[derive(Clone, Debug)]
pub struct ParticlePool {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    colors: Vec<Vec3>,
    sizes: Vec<f32>,
    start_sizes: Vec<f32>,
    end_sizes: Vec<f32>,
    alive: Vec<bool>,
    durations: Vec<f32>,
    alive_count: usize,
    sync: RenderSync,
}

impl ParticlePool {
    /// Create a pool with `capacity` dead slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: vec![Vec3::ZERO; capacity],
            velocities: vec![Vec3::ZERO; capacity],
            colors: vec![Vec3::ZERO; capacity],
            sizes: vec![0.0; capacity],
            start_sizes: vec![0.0; capacity],
            end_sizes: vec![0.0; capacity],
            alive: vec![false; capacity],
            durations: vec![0.0; capacity],
            alive_count: 0,
            sync: RenderSync::new(),
        }
    }

    /// Lowest-index dead slot, or `None` if every slot is alive.
    pub fn allocate(&self) -> Option<usize> {
        if self.is_exhausted() {
            return None;
        }
        self.alive.iter().position(|alive| !alive)
    }

    /// Bring `slot` to life with fresh attributes and a zero duration.
    ///
    /// Marks positions, colors and sizes dirty.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    pub fn activate(&mut self, slot: usize, init: &ParticleInit) {
        if !self.alive[slot] {
            self.alive_count += 1;
        }
        self.alive[slot] = true;
        self.durations[slot] = 0.0;
        self.positions[slot] = init.position;
        self.velocities[slot] = init.velocity;
        self.start_sizes[slot] = init.start_size;
        self.end_sizes[slot] = init.end_size;
        self.sizes[slot] = init.start_size;
        self.colors[slot] = init.color;
        self.sync
            .mark(DirtyBuffers::POSITIONS | DirtyBuffers::COLORS | DirtyBuffers::SIZES);
    }

    /// Return `slot` to the dead state: zero duration, zero size, black.
    ///
    /// Velocity is left as is; it is not read while the slot is dead.
    /// Marks colors and sizes dirty.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    pub fn deactivate(&mut self, slot: usize) {
        if self.alive[slot] {
            self.alive_count -= 1;
        }
        self.alive[slot] = false;
        self.durations[slot] = 0.0;
        self.sizes[slot] = 0.0;
        self.colors[slot] = Vec3::ZERO;
        self.sync.mark(DirtyBuffers::COLORS | DirtyBuffers::SIZES);
    }

    /// Deactivate every slot.
    pub fn clear(&mut self) {
        for slot in 0..self.capacity() {
            self.deactivate(slot);
        }
    }

    /// Call `f` for every live slot in ascending index order.
    ///
    /// Slots killed through [`ParticleMut::deactivate`] are accounted for
    /// after the callback, with the same dirty marking as [`deactivate`](Self::deactivate).
    /// Returns the number of slots visited.
    pub fn for_each_alive<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(ParticleMut<'_>),
    {
        let mut visited = 0;
        let mut expired = 0;

        for (i, alive) in self.alive.iter_mut().enumerate() {
            if !*alive {
                continue;
            }
            visited += 1;

            f(ParticleMut {
                index: i,
                position: &mut self.positions[i],
                velocity: &mut self.velocities[i],
                color: &mut self.colors[i],
                size: &mut self.sizes[i],
                start_size: self.start_sizes[i],
                end_size: self.end_sizes[i],
                duration_ms: &mut self.durations[i],
                alive: &mut *alive,
            });

            if !*alive {
                expired += 1;
            }
        }

        if expired > 0 {
            self.alive_count -= expired;
            self.sync.mark(DirtyBuffers::COLORS | DirtyBuffers::SIZES);
        }
        visited
    }

    // ========== Queries ==========

    #[inline]
    pub fn capacity(&self) -> usize {
        self.alive.len()
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Every slot is alive; the next allocation will fail.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.alive_count == self.capacity()
    }

    #[inline]
    pub fn is_alive(&self, slot: usize) -> bool {
        self.alive[slot]
    }

    #[inline]
    pub fn duration_ms(&self, slot: usize) -> f32 {
        self.durations[slot]
    }

    #[inline]
    pub fn start_size(&self, slot: usize) -> f32 {
        self.start_sizes[slot]
    }

    #[inline]
    pub fn end_size(&self, slot: usize) -> f32 {
        self.end_sizes[slot]
    }

    /// Indices of live slots in ascending order.
    pub fn alive_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter_map(|(i, &alive)| alive.then_some(i))
    }

    // ========== Render buffers ==========

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Positions as tightly packed `f32` triples, ready for upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as tightly packed RGB `f32` triples.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn size_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sizes)
    }

    // ========== Dirty tracking ==========

    pub fn sync(&self) -> &RenderSync {
        &self.sync
    }

    pub fn sync_mut(&mut self) -> &mut RenderSync {
        &mut self.sync
    }
}
