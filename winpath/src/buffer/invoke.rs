//! The grow-and-retry invocation protocol.

use std::fmt;

use super::{BufferPool, NativeBuffer};
use crate::error::{translate, ErrorClass, NativeErrorCode, NativeErrorSource, Result};
use crate::path::MAX_LONG_PATH;

/// Parameters of one native invocation.
///
/// # Examples
///
/// ```
/// use winpath::buffer::Invocation;
/// use winpath::NativeErrorCode;
///
/// let invocation = Invocation::new(260)
///     .subject("PATH")
///     .absent_when(|code| code == NativeErrorCode::ERROR_ENVVAR_NOT_FOUND);
/// assert_eq!(invocation.initial_capacity(), 260);
/// ```
pub struct Invocation<'a> {
    initial_capacity: usize,
    subject: &'a str,
    absent_when: Option<Box<dyn Fn(NativeErrorCode) -> bool + 'a>>,
}

impl<'a> Invocation<'a> {
    /// Start with a buffer of `initial_capacity` characters.
    #[must_use]
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            subject: "",
            absent_when: None,
        }
    }

    /// The path or value the call is made for; attached to any error.
    #[must_use]
    pub fn subject(mut self, subject: &'a str) -> Self {
        self.subject = subject;
        self
    }

    /// Treat failure codes matching `predicate` as "no value" rather than
    /// an error.
    #[must_use]
    pub fn absent_when(mut self, predicate: impl Fn(NativeErrorCode) -> bool + 'a) -> Self {
        self.absent_when = Some(Box::new(predicate));
        self
    }

    /// The starting buffer capacity.
    #[must_use]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    fn is_absence(&self, code: NativeErrorCode) -> bool {
        self.absent_when.as_ref().is_some_and(|predicate| predicate(code))
    }
}

impl fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("initial_capacity", &self.initial_capacity)
            .field("subject", &self.subject)
            .field("absent_when", &self.absent_when.is_some())
            .finish()
    }
}

impl BufferPool {
    /// Run a native call under the buffer-growth protocol.
    ///
    /// `call` receives a buffer and returns the written length, the
    /// required length, or `0` with the failure code available from
    /// `errors`. Capacity failures (`ERROR_INSUFFICIENT_BUFFER`,
    /// `ERROR_MORE_DATA`, `ERROR_FILENAME_EXCED_RANGE`) double the buffer
    /// and retry; `ERROR_FILENAME_EXCED_RANGE` stops being retried once the
    /// buffer holds [`MAX_LONG_PATH`] characters. A zero return with `ERROR_SUCCESS` is an empty result.
    /// Codes accepted by the invocation's absence predicate yield
    /// `Ok(None)`; any other code is translated into an error immediately.
    ///
    /// The buffer is returned to the pool on every exit path.
    ///
    /// # Errors
    ///
    /// Returns the translated native error for a non-retryable failure.
    pub fn invoke<E, F>(
        &self,
        errors: &E,
        invocation: &Invocation<'_>,
        mut call: F,
    ) -> Result<Option<String>>
    where
        E: NativeErrorSource + ?Sized,
        F: FnMut(&mut NativeBuffer) -> usize,
    {
        let mut buffer = self.acquire(invocation.initial_capacity.max(1));
        loop {
            let returned = call(&mut *buffer);
            let capacity = buffer.capacity();

            if returned > capacity {
                log::trace!(
                    "growing buffer for '{}' from {capacity} to {returned} characters",
                    invocation.subject
                );
                buffer.ensure_capacity(returned);
                continue;
            }

            if returned == 0 {
                let code = errors.last_error();
                if code == NativeErrorCode::ERROR_SUCCESS {
                    buffer.set_length(0);
                    return Ok(Some(String::new()));
                }
                if ErrorClass::of(code) == ErrorClass::RetryableCapacity
                    && !range_exhausted(code, capacity)
                {
                    let grown = capacity.saturating_mul(2);
                    log::trace!(
                        "{code} for '{}', doubling buffer to {grown} characters",
                        invocation.subject
                    );
                    buffer.ensure_capacity(grown);
                    continue;
                }
                if invocation.is_absence(code) {
                    log::debug!("'{}' reported absent ({code})", invocation.subject);
                    return Ok(None);
                }
                return Err(translate(code, invocation.subject));
            }

            buffer.set_length(returned);
            return Ok(Some(buffer.to_string_lossy()));
        }
    }

    /// Like [`invoke`](Self::invoke), for calls that have no absence case.
    ///
    /// # Errors
    ///
    /// Returns the translated native error for a non-retryable failure, or
    /// `NotFound` if the invocation's absence predicate matched.
    pub fn invoke_required<E, F>(
        &self,
        errors: &E,
        invocation: &Invocation<'_>,
        call: F,
    ) -> Result<String>
    where
        E: NativeErrorSource + ?Sized,
        F: FnMut(&mut NativeBuffer) -> usize,
    {
        self.invoke(errors, invocation, call)?.ok_or_else(|| {
            translate(NativeErrorCode::ERROR_NOT_FOUND, invocation.subject)
        })
    }
}

// No path is longer than `MAX_LONG_PATH`, so a range error past it is final.
fn range_exhausted(code: NativeErrorCode, capacity: usize) -> bool {
    code == NativeErrorCode::ERROR_FILENAME_EXCED_RANGE && capacity > MAX_LONG_PATH
}
