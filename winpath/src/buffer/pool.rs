//! A small, internally synchronized pool of [`NativeBuffer`]s.

use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

use super::NativeBuffer;

/// Pool of reusable native buffers.
///
/// The pool is an explicit object injected into the components that make
/// native calls; there is no process-wide buffer cache. Buffers are handed
/// out as [`PooledBuffer`] guards that return themselves on drop, so every
/// exit path, including errors and panics, releases the buffer. Concurrent
/// callers always receive distinct buffers.
#[derive(Debug)]
pub struct BufferPool {
    idle: Mutex<Vec<NativeBuffer>>,
    max_retained: usize,
}

impl BufferPool {
    /// Create a pool that keeps at most `max_retained` idle buffers.
    #[must_use]
    pub fn new(max_retained: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::with_capacity(max_retained)),
            max_retained,
        }
    }

    /// Take a buffer with room for at least `capacity` characters.
    pub fn acquire(&self, capacity: usize) -> PooledBuffer<'_> {
        let mut buffer = self.idle.lock().pop().unwrap_or_default();
        buffer.clear();
        buffer.ensure_capacity(capacity);
        PooledBuffer { pool: self, buffer }
    }

    /// Number of idle buffers currently retained.
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    fn release(&self, buffer: NativeBuffer) {
        let mut idle = self.idle.lock();
        if idle.len() < self.max_retained {
            idle.push(buffer);
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_POOLED_BUFFERS)
    }
}

/// A buffer on loan from a [`BufferPool`].
///
/// Dereferences to [`NativeBuffer`]; returned to the pool when dropped.
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buffer: NativeBuffer,
}

impl Deref for PooledBuffer<'_> {
    type Target = NativeBuffer;

    fn deref(&self) -> &NativeBuffer {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut NativeBuffer {
        &mut self.buffer
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buffer));
    }
}
