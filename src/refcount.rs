//! Reference counters embedded in foreign records.
//!
//! Some foreign structures carry an `int references` field that the library
//! manipulates with its own atomic primitive. Bumping it means reaching into
//! the record at a byte offset taken from the library's headers, so the
//! access is confined to this module and gated on a [`ReferenceLayout`] that
//! can only be created unsafely.
//!
//! # Layout
//!
//! ```text
//! handle ──► +-------------------+ 0
//!            | ...               |
//!            +-------------------+ offset
//!            | c_int references  |
//!            +-------------------+
//!            | ...               |
//! ```

use std::os::raw::c_int;
use std::ptr::NonNull;

use crate::ffi::{IncrementFn, RawHandle};

/// Byte offset of the `references` counter inside a foreign record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceLayout {
    offset: usize,
}

impl ReferenceLayout {
    /// Describe a record whose counter lives `offset` bytes from its start.
    ///
    /// # Safety
    ///
    /// `offset` must be the documented offset of a `c_int` reference counter
    /// in every record this layout is used with, and that field must be
    /// suitably aligned whenever the record itself is.
    pub const unsafe fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// Byte offset of the counter.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Address of the counter inside the record at `handle`.
    ///
    /// Returns `None` for the zero handle or a misaligned field address.
    ///
    /// # Safety
    ///
    /// `handle` must point to a live record with this layout.
    pub unsafe fn field(&self, handle: RawHandle) -> Option<NonNull<c_int>> {
        if !handle.is_valid() {
            return None;
        }
        let addr = handle.addr().checked_add(self.offset)?;
        if addr % std::mem::align_of::<c_int>() != 0 {
            return None;
        }
        NonNull::new(addr as *mut c_int)
    }
}

/// Increment the record's counter through the library's own routine.
///
/// Returns the new count, or `None` if the handle is zero or the counter
/// address is misaligned.
///
/// # Safety
///
/// `handle` must point to a live record with `layout`, and `increment` must
/// be the library's atomic increment for that counter.
pub unsafe fn increment_with(
    layout: ReferenceLayout,
    handle: RawHandle,
    increment: IncrementFn,
) -> Option<c_int> {
    let field = layout.field(handle)?;
    Some(increment(field.as_ptr()))
}
