//! Process-wide scratch buffer pool for histogram tables.
//!
//! The sparse histogram table is sized to twice the frame area, which makes
//! it the largest allocation of a quantization call. The pool keeps a few of
//! those tables around between calls. New tables are allocated at a shared
//! capacity estimate that follows demand upward immediately and decays by 1%
//! per checkout whenever a smaller table was requested, so one huge frame
//! does not pin memory forever.
//!
//! The estimate and the free list sit behind separate locks, each held only
//! for the update or the push/pop, never across a quantization call.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

use crate::color::ColorSample;

/// Tables kept on the free list; extras are dropped on return.
const MAX_POOLED_BUFFERS: usize = 4;

static GLOBAL_POOL: ScratchPool = ScratchPool::new();

/// Exponentially decayed high-water mark of requested table sizes.
#[derive(Debug)]
struct CapacityEstimate {
    max_cap: usize,
}

impl CapacityEstimate {
    /// Record a request for `needed` slots and return the allocation size.
    fn observe(&mut self, needed: usize) -> usize {
        if self.max_cap > needed {
            self.max_cap = self.max_cap * 99 / 100;
        }
        if self.max_cap < needed {
            self.max_cap = needed;
        }
        self.max_cap
    }
}

/// A free list of zeroed sample tables plus the shared sizing estimate.
#[derive(Debug)]
pub struct ScratchPool {
    estimate: Mutex<CapacityEstimate>,
    free: Mutex<Vec<Vec<ColorSample>>>,
}

impl ScratchPool {
    /// An empty pool. Independent pools are mainly useful in tests; the
    /// quantizer uses [`ScratchPool::global`].
    pub const fn new() -> Self {
        Self {
            estimate: Mutex::new(CapacityEstimate { max_cap: 0 }),
            free: Mutex::new(Vec::new()),
        }
    }

    /// The pool shared by every quantization in the process.
    pub fn global() -> &'static ScratchPool {
        &GLOBAL_POOL
    }

    /// Check out a table of exactly `len` empty samples.
    ///
    /// A pooled table is reused when its capacity suffices and is shrunk to
    /// the current estimate if it is larger; an undersized one is discarded
    /// and a fresh table allocated at the estimate. The
    /// table goes back to the pool when the returned guard drops.
    pub fn checkout(&self, len: usize) -> ScratchBuffer<'_> {
        let target = self
            .estimate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .observe(len);
        let pooled = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();

        let target = target.max(len);
        let mut buf = match pooled {
            Some(buf) if buf.capacity() >= len => buf,
            _ => Vec::with_capacity(target),
        };
        buf.clear();
        // Pooled tables follow the decaying estimate down.
        if buf.capacity() > target {
            buf.shrink_to(target);
        }
        buf.resize(len, ColorSample::EMPTY);

        ScratchBuffer { pool: self, buf }
    }

    /// Current allocation size estimate, in samples.
    pub fn capacity_estimate(&self) -> usize {
        self.estimate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .max_cap
    }

    /// Number of tables waiting on the free list.
    pub fn pooled(&self) -> usize {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[cfg(test)]
    fn pooled_capacity(&self) -> usize {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(Vec::capacity)
            .sum()
    }

    fn give_back(&self, buf: Vec<ColorSample>) {
        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        if free.len() < MAX_POOLED_BUFFERS {
            free.push(buf);
        }
    }
}

impl Default for ScratchPool {
    fn default() -> Self {
        Self::new()
    }
}

/// A table checked out of a [`ScratchPool`].
///
/// Exclusively owned by the holder; returned to the pool on drop.
#[derive(Debug)]
pub struct ScratchBuffer<'a> {
    pool: &'a ScratchPool,
    buf: Vec<ColorSample>,
}

impl Deref for ScratchBuffer<'_> {
    type Target = [ColorSample];

    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl DerefMut for ScratchBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl Drop for ScratchBuffer<'_> {
    fn drop(&mut self) {
        let buf = std::mem::take(&mut self.buf);
        self.pool.give_back(buf);
    }
}
