//! Raw C ABI types for foreign collaborators.
//!
//! A foreign library exposes one release routine per resource kind, an
//! optional routine that prints an object's state into a caller-owned
//! character buffer, and an atomic increment for reference-counted records.
//! Users should prefer the [`ForeignResource`](crate::ForeignResource) trait.

use std::os::raw::{c_char, c_int, c_void};

/// Return code type for print routines.
///
/// Non-negative values are the length of the full text, excluding the NUL
/// terminator, as `snprintf` reports it; negative values are failures. The
/// output only fit if this is less than the offered length.
pub type PrintCode = c_int;

/// Generic print failure.
pub const NH_PRINT_ERR: PrintCode = -1;

/// Frees a foreign resource. Must not be called twice for the same address.
pub type ReleaseFn = unsafe extern "C" fn(handle: *mut c_void);

/// Renders the foreign object's state into `buf` like `snprintf`: at most
/// `len - 1` characters followed by a NUL.
pub type PrintFn = unsafe extern "C" fn(handle: *mut c_void, buf: *mut c_char, len: usize) -> PrintCode;

/// Atomically increments the counter at `field`, returning the new value.
pub type IncrementFn = unsafe extern "C" fn(field: *mut c_int) -> c_int;
