//! Error types for the winpath library.
//!
//! Every native failure is funnelled through [`translate`], which turns a
//! Win32 error code plus the subject of the call into a structured
//! [`Error`]. Codes that only mean "the buffer was too small" are
//! classified as [`ErrorClass::RetryableCapacity`] and never leave the
//! buffer protocol in [`crate::buffer`].

use std::fmt;

use thiserror::Error;

/// Result type alias for operations that may fail with a winpath error.
///
/// # Examples
///
/// ```
/// use winpath::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok(r"C:\".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// A raw Win32 error code, as reported by `GetLastError`.
///
/// # Examples
///
/// ```
/// use winpath::NativeErrorCode;
///
/// let code = NativeErrorCode::ERROR_ACCESS_DENIED;
/// assert_eq!(code.value(), 5);
/// assert_eq!(code.to_string(), "ERROR_ACCESS_DENIED (5)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct NativeErrorCode(u32);

impl NativeErrorCode {
    /// The operation completed successfully.
    pub const ERROR_SUCCESS: Self = Self(0);
    /// The system cannot find the file specified.
    pub const ERROR_FILE_NOT_FOUND: Self = Self(2);
    /// The system cannot find the path specified.
    pub const ERROR_PATH_NOT_FOUND: Self = Self(3);
    /// Access is denied.
    pub const ERROR_ACCESS_DENIED: Self = Self(5);
    /// Not enough memory resources are available.
    pub const ERROR_NOT_ENOUGH_MEMORY: Self = Self(8);
    /// The system cannot find the drive specified.
    pub const ERROR_INVALID_DRIVE: Self = Self(15);
    /// The device is not ready.
    pub const ERROR_NOT_READY: Self = Self(21);
    /// The network path was not found.
    pub const ERROR_BAD_NETPATH: Self = Self(53);
    /// The parameter is incorrect.
    pub const ERROR_INVALID_PARAMETER: Self = Self(87);
    /// This function is not supported on this system.
    pub const ERROR_CALL_NOT_IMPLEMENTED: Self = Self(120);
    /// The data area passed to a system call is too small.
    pub const ERROR_INSUFFICIENT_BUFFER: Self = Self(122);
    /// The filename, directory name, or volume label syntax is incorrect.
    pub const ERROR_INVALID_NAME: Self = Self(123);
    /// The specified path is invalid.
    pub const ERROR_BAD_PATHNAME: Self = Self(161);
    /// The system could not find the environment option that was entered.
    pub const ERROR_ENVVAR_NOT_FOUND: Self = Self(203);
    /// The filename or extension is too long.
    pub const ERROR_FILENAME_EXCED_RANGE: Self = Self(206);
    /// More data is available.
    pub const ERROR_MORE_DATA: Self = Self(234);
    /// Element not found.
    pub const ERROR_NOT_FOUND: Self = Self(1168);
    /// A required privilege is not held by the client.
    pub const ERROR_PRIVILEGE_NOT_HELD: Self = Self(1314);

    /// Wrap a raw code.
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// The raw numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The symbolic name of well-known codes, `None` for anything else.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::ERROR_SUCCESS => "ERROR_SUCCESS",
            Self::ERROR_FILE_NOT_FOUND => "ERROR_FILE_NOT_FOUND",
            Self::ERROR_PATH_NOT_FOUND => "ERROR_PATH_NOT_FOUND",
            Self::ERROR_ACCESS_DENIED => "ERROR_ACCESS_DENIED",
            Self::ERROR_NOT_ENOUGH_MEMORY => "ERROR_NOT_ENOUGH_MEMORY",
            Self::ERROR_INVALID_DRIVE => "ERROR_INVALID_DRIVE",
            Self::ERROR_NOT_READY => "ERROR_NOT_READY",
            Self::ERROR_BAD_NETPATH => "ERROR_BAD_NETPATH",
            Self::ERROR_INVALID_PARAMETER => "ERROR_INVALID_PARAMETER",
            Self::ERROR_CALL_NOT_IMPLEMENTED => "ERROR_CALL_NOT_IMPLEMENTED",
            Self::ERROR_INSUFFICIENT_BUFFER => "ERROR_INSUFFICIENT_BUFFER",
            Self::ERROR_INVALID_NAME => "ERROR_INVALID_NAME",
            Self::ERROR_BAD_PATHNAME => "ERROR_BAD_PATHNAME",
            Self::ERROR_ENVVAR_NOT_FOUND => "ERROR_ENVVAR_NOT_FOUND",
            Self::ERROR_FILENAME_EXCED_RANGE => "ERROR_FILENAME_EXCED_RANGE",
            Self::ERROR_MORE_DATA => "ERROR_MORE_DATA",
            Self::ERROR_NOT_FOUND => "ERROR_NOT_FOUND",
            Self::ERROR_PRIVILEGE_NOT_HELD => "ERROR_PRIVILEGE_NOT_HELD",
            _ => return None,
        };
        Some(name)
    }

    /// Which part of the error taxonomy this code belongs to.
    #[must_use]
    pub fn class(self) -> ErrorClass {
        ErrorClass::of(self)
    }
}

impl fmt::Display for NativeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "error code {}", self.0),
        }
    }
}

impl From<u32> for NativeErrorCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

/// Coarse grouping of native error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The output buffer was too small; grow and call again.
    RetryableCapacity,
    /// The targeted file, path, variable, device or volume does not exist.
    NotFound,
    /// The caller lacks the rights for the operation.
    PrivilegeOrAccessDenied,
    /// Anything else.
    Other,
}

impl ErrorClass {
    /// Classify a native error code.
    #[must_use]
    pub fn of(code: NativeErrorCode) -> Self {
        match code {
            NativeErrorCode::ERROR_INSUFFICIENT_BUFFER
            | NativeErrorCode::ERROR_MORE_DATA
            | NativeErrorCode::ERROR_FILENAME_EXCED_RANGE => Self::RetryableCapacity,
            NativeErrorCode::ERROR_FILE_NOT_FOUND
            | NativeErrorCode::ERROR_PATH_NOT_FOUND
            | NativeErrorCode::ERROR_INVALID_DRIVE
            | NativeErrorCode::ERROR_BAD_NETPATH
            | NativeErrorCode::ERROR_ENVVAR_NOT_FOUND
            | NativeErrorCode::ERROR_NOT_FOUND => Self::NotFound,
            NativeErrorCode::ERROR_ACCESS_DENIED | NativeErrorCode::ERROR_PRIVILEGE_NOT_HELD => {
                Self::PrivilegeOrAccessDenied
            }
            _ => Self::Other,
        }
    }
}

/// Anything that can report the error code of the last failed native call.
///
/// The buffer protocol consults this after a call returns `0`.
pub trait NativeErrorSource {
    /// The calling thread's last native error code.
    fn last_error(&self) -> NativeErrorCode;
}

/// The main error type for the winpath library.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument was structurally unacceptable, e.g. a relative path
    /// where an absolute one is required.
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// The offending argument value.
        argument: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A native call reported that its target does not exist.
    #[error("not found: {subject} [{code}]")]
    NotFound {
        /// The native error code.
        code: NativeErrorCode,
        /// The path or value the call was made for.
        subject: String,
    },

    /// A native call was refused for lack of access rights or privileges.
    #[error("access denied: {subject} [{code}]")]
    AccessDenied {
        /// The native error code.
        code: NativeErrorCode,
        /// The path or value the call was made for.
        subject: String,
    },

    /// Any other native failure.
    #[error("native operation failed: {subject} [{code}]")]
    NativeOperationFailed {
        /// The native error code.
        code: NativeErrorCode,
        /// The path or value the call was made for.
        subject: String,
    },

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an [`Error::InvalidArgument`].
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// The native error code carried by this error, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use winpath::{error::translate, NativeErrorCode};
    ///
    /// let err = translate(NativeErrorCode::ERROR_NOT_READY, r"A:\");
    /// assert_eq!(err.code(), Some(NativeErrorCode::ERROR_NOT_READY));
    /// ```
    #[must_use]
    pub fn code(&self) -> Option<NativeErrorCode> {
        match self {
            Self::NotFound { code, .. }
            | Self::AccessDenied { code, .. }
            | Self::NativeOperationFailed { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Check if the error reports a missing resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error is access or privilege related.
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// Check if the error rejects a caller-supplied argument.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Translate a native error code into a structured error.
///
/// The subject is the path or value the failing call operated on and is
/// kept verbatim for diagnostics. The mapping is total: a capacity code
/// that somehow escapes the buffer protocol still becomes
/// [`Error::NativeOperationFailed`].
///
/// # Examples
///
/// ```
/// use winpath::{error::translate, NativeErrorCode};
///
/// let err = translate(NativeErrorCode::ERROR_PATH_NOT_FOUND, r"Q:\missing");
/// assert!(err.is_not_found());
/// assert!(err.to_string().contains(r"Q:\missing"));
/// ```
pub fn translate(code: NativeErrorCode, subject: impl Into<String>) -> Error {
    let subject = subject.into();
    log::debug!("native call for '{subject}' failed with {code}");
    match ErrorClass::of(code) {
        ErrorClass::NotFound => Error::NotFound { code, subject },
        ErrorClass::PrivilegeOrAccessDenied => Error::AccessDenied { code, subject },
        ErrorClass::RetryableCapacity | ErrorClass::Other => {
            Error::NativeOperationFailed { code, subject }
        }
    }
}
