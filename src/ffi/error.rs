//! Error conversion utilities for FFI.

use super::raw::PrintCode;
use crate::error::{Error, Result};

/// Check a print return code against the buffer capacity that was offered.
///
/// A routine that filled the whole buffer has truncated its text to make
/// room for the terminator, so only `code < capacity` counts as success.
///
/// Returns the length of the text, excluding the terminator.
pub fn check_print(code: PrintCode, capacity: usize) -> Result<usize> {
    if code < 0 {
        return Err(Error::PrintFailed { code });
    }

    let written = code as usize;
    if written >= capacity {
        return Err(Error::BufferOverflow { capacity });
    }

    Ok(written)
}
