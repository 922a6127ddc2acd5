//! Growable UTF-16 buffers and the native "call, check size, grow, retry"
//! protocol.
//!
//! Every native API in this crate that produces a string of unknown length
//! goes through [`BufferPool::invoke`]. The native call is expressed as a
//! closure that writes into a [`NativeBuffer`] and returns one of:
//!
//! - the number of characters written (`<= capacity`): success,
//! - the number of characters required (`> capacity`): grow and retry,
//! - `0`: failure, inspect the last native error.
//!
//! # Examples
//!
//! ```
//! use winpath::buffer::{BufferPool, Invocation};
//! use winpath::{NativeErrorCode, NativeErrorSource};
//!
//! struct NoError;
//! impl NativeErrorSource for NoError {
//!     fn last_error(&self) -> NativeErrorCode {
//!         NativeErrorCode::ERROR_SUCCESS
//!     }
//! }
//!
//! let pool = BufferPool::new(4);
//! let value = pool
//!     .invoke(&NoError, &Invocation::new(2), |buffer| buffer.write_str("hello"))
//!     .unwrap();
//! assert_eq!(value.as_deref(), Some("hello"));
//! ```

mod invoke;
mod pool;

pub use invoke::Invocation;
pub use pool::{BufferPool, PooledBuffer};

/// An exclusively owned, resizable UTF-16 character store.
///
/// The storage is always zero-initialized up to [`capacity`](Self::capacity)
/// so it can be handed to native APIs as an output pointer. `length` is the
/// number of meaningful characters after a successful call.
#[derive(Debug, Clone, Default)]
pub struct NativeBuffer {
    data: Vec<u16>,
    length: usize,
}

impl NativeBuffer {
    /// Create a buffer with room for `capacity` characters.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            length: 0,
        }
    }

    /// Number of characters the buffer can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Capacity as the `u32` native APIs expect, saturating.
    #[must_use]
    pub fn capacity_u32(&self) -> u32 {
        u32::try_from(self.data.len()).unwrap_or(u32::MAX)
    }

    /// Number of meaningful characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether no meaningful characters are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Grow so that at least `capacity` characters fit. Never shrinks.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        if capacity > self.data.len() {
            self.data.resize(capacity, 0);
        }
    }

    /// Reset the length and zero the storage for reuse.
    pub fn clear(&mut self) {
        self.data.fill(0);
        self.length = 0;
    }

    /// Set the number of meaningful characters, clamped to capacity.
    pub fn set_length(&mut self, length: usize) {
        self.length = length.min(self.data.len());
    }

    /// Set the length to the position of the first NUL character, or to
    /// the full capacity if there is none.
    pub fn set_length_to_first_null(&mut self) {
        self.length = self
            .data
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(self.data.len());
    }

    /// Raw storage, sized to capacity.
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }

    /// Mutable raw storage, sized to capacity.
    pub fn as_mut_slice(&mut self) -> &mut [u16] {
        &mut self.data
    }

    /// Mutable pointer to the storage, for native output parameters.
    pub fn as_mut_ptr(&mut self) -> *mut u16 {
        self.data.as_mut_ptr()
    }

    /// Write `value` followed by a NUL using native sizing conventions.
    ///
    /// If `value` plus its terminator fits, it is copied and its length (in
    /// UTF-16 units, without the terminator) is returned. Otherwise nothing
    /// is written and the required capacity, terminator included, is
    /// returned. This is the shape of `GetFullPathNameW` and friends.
    pub fn write_str(&mut self, value: &str) -> usize {
        let units: Vec<u16> = value.encode_utf16().collect();
        let required = units.len() + 1;
        if required > self.data.len() {
            return required;
        }
        self.data[..units.len()].copy_from_slice(&units);
        self.data[units.len()] = 0;
        units.len()
    }

    /// Copy the meaningful characters out into an owned string.
    ///
    /// Unpaired surrogates are replaced with U+FFFD.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.data[..self.length])
    }
}

/// Split a NUL-separated multi-string into its non-empty entries.
///
/// # Examples
///
/// ```
/// use winpath::buffer::split_multi_string;
///
/// assert_eq!(
///     split_multi_string("C:\\\0D:\\\0\0"),
///     vec!["C:\\".to_string(), "D:\\".to_string()]
/// );
/// assert!(split_multi_string("").is_empty());
/// ```
#[must_use]
pub fn split_multi_string(value: &str) -> Vec<String> {
    value
        .split('\0')
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
