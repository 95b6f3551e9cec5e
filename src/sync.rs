//! Dirty tracking between the simulation and an external renderer.
//!
//! The pool marks a buffer dirty whenever it writes to it. The renderer polls
//! once per frame, after [`advance`](crate::ParticleSimulator::advance) has
//! returned, and re-uploads only the buffers that changed:
//!
//! ```ignore
//! sim.advance(dt_ms);
//! let dirty = sim.take_dirty();
//! if dirty.contains(DirtyBuffers::POSITIONS) {
//!     upload(sim.pool().position_bytes());
//! }
//! ```

use bitflags::bitflags;

bitflags! {
    /// Attribute buffers that changed since they were last consumed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DirtyBuffers: u8 {
        const POSITIONS = 1 << 0;
        const COLORS = 1 << 1;
        const SIZES = 1 << 2;
    }
}

/// Pending dirty flags, owned by the pool and drained by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderSync {
    dirty: DirtyBuffers,
}

impl RenderSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag `buffers` as changed.
    #[inline]
    pub fn mark(&mut self, buffers: DirtyBuffers) {
        self.dirty |= buffers;
    }

    /// Return the pending flags and clear them.
    #[inline]
    pub fn take(&mut self) -> DirtyBuffers {
        std::mem::take(&mut self.dirty)
    }

    /// Pending flags, left in place.
    #[inline]
    pub fn peek(&self) -> DirtyBuffers {
        self.dirty
    }

    /// Clear only `buffers`, keeping any other pending flags.
    #[inline]
    pub fn clear(&mut self, buffers: DirtyBuffers) {
        self.dirty.remove(buffers);
    }

    #[inline]
    pub fn positions_changed(&self) -> bool {
        self.dirty.contains(DirtyBuffers::POSITIONS)
    }

    #[inline]
    pub fn colors_changed(&self) -> bool {
        self.dirty.contains(DirtyBuffers::COLORS)
    }

    #[inline]
    pub fn sizes_changed(&self) -> bool {
        self.dirty.contains(DirtyBuffers::SIZES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_clean() {
        let sync = RenderSync::new();
        assert!(sync.peek().is_empty());
        assert!(!sync.positions_changed());
    }

    #[test]
    fn test_take_clears() {
        let mut sync = RenderSync::new();
        sync.mark(DirtyBuffers::POSITIONS | DirtyBuffers::SIZES);
        assert!(sync.positions_changed());
        assert!(sync.sizes_changed());
        assert!(!sync.colors_changed());

        let taken = sync.take();
        assert_eq!(taken, DirtyBuffers::POSITIONS | DirtyBuffers::SIZES);
        assert!(sync.peek().is_empty());
    }

    #[test]
    fn test_flags_are_independent() {
        let mut sync = RenderSync::new();
        sync.mark(DirtyBuffers::all());
        sync.clear(DirtyBuffers::COLORS);
        assert!(sync.positions_changed());
        assert!(!sync.colors_changed());
        assert!(sync.sizes_changed());
    }
}
