//! Error types for the native-handle crate.

use thiserror::Error;

/// Result type alias for native-handle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for native-handle operations.
///
/// The lifecycle operations themselves (dispose, reassignment, drop) never
/// fail; these errors only come out of diagnostic rendering.
#[derive(Error, Debug)]
pub enum Error {
    /// The resource kind has no print routine.
    #[error("print not supported for this resource kind")]
    PrintUnsupported,

    /// The foreign print routine reported a failure.
    #[error("foreign print failed with code {code}")]
    PrintFailed {
        /// Code returned by the foreign routine.
        code: i32,
    },

    /// The rendered text did not fit in the scratch buffer.
    #[error("print output exceeds buffer capacity of {capacity} bytes")]
    BufferOverflow {
        /// Capacity of the buffer that was offered.
        capacity: usize,
    },

    /// The rendered bytes are not valid UTF-8.
    #[error("print output is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The handle is the zero sentinel.
    #[error("null handle")]
    NullHandle,

    /// A foreign collaborator panicked.
    #[error("collaborator panicked")]
    Panicked,
}

impl Error {
    /// Check if this error means printing is not available at all.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::PrintUnsupported)
    }

    /// Check if this is a buffer overflow error.
    pub fn is_overflow(&self) -> bool {
        matches!(self, Error::BufferOverflow { .. })
    }
}
