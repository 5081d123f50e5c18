//! Uniform status codes
//!
//! Every capability-table operation and every generic driver operation
//! reports through the same small taxonomy.

use core::fmt;

/// Failure reported by a driver operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Generic backend failure, forwarded verbatim
    Backend,
    /// Argument rejected by the generic layer before reaching the backend
    InvalidArgument,
    /// Optional capability the backend does not provide
    NotSupported,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Backend => f.write_str("backend error"),
            Error::InvalidArgument => f.write_str("invalid argument"),
            Error::NotSupported => f.write_str("not supported"),
        }
    }
}

/// Result type used throughout perikit
pub type Result<T> = core::result::Result<T, Error>;

/// Numeric status code
///
/// The same outcomes as [`Result<()>`], as a single byte for callers that
/// store or report raw codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Status {
    Ok = 0,
    Error = 1,
    InvalidArgument = 2,
    NotSupported = 3,
}

impl Status {
    /// Get the status as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a status from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Status::Ok),
            1 => Some(Status::Error),
            2 => Some(Status::InvalidArgument),
            3 => Some(Status::NotSupported),
            _ => None,
        }
    }

    /// Convert back into a `Result`
    pub fn into_result(self) -> Result<()> {
        match self {
            Status::Ok => Ok(()),
            Status::Error => Err(Error::Backend),
            Status::InvalidArgument => Err(Error::InvalidArgument),
            Status::NotSupported => Err(Error::NotSupported),
        }
    }
}

impl From<Error> for Status {
    fn from(e: Error) -> Self {
        match e {
            Error::Backend => Status::Error,
            Error::InvalidArgument => Status::InvalidArgument,
            Error::NotSupported => Status::NotSupported,
        }
    }
}

impl<T> From<&Result<T>> for Status {
    fn from(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(e) => (*e).into(),
        }
    }
}
