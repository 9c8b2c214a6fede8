//! Per-kind collaborator capabilities.

use crate::buffer::ScratchBuffer;
use crate::error::{Error, Result};
use crate::ffi::{IncrementFn, PrintFn, RawHandle, ReleaseFn};
use crate::refcount::{self, ReferenceLayout};

/// The operations a foreign resource kind supplies to [`Wrapped`](crate::Wrapped).
///
/// One implementation exists per kind of foreign object. Only `release` is
/// required; everything else has an inert default.
pub trait ForeignResource {
    /// Name of the kind, used in logs and `Debug` output.
    fn kind(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Free the foreign resource at `handle`.
    ///
    /// Called at most once per owned non-zero handle, never with zero.
    fn release(&mut self, handle: RawHandle);

    /// Render the foreign object's state into `out`.
    fn print(&self, handle: RawHandle, out: &mut ScratchBuffer) -> Result<()> {
        let _ = (handle, out);
        Err(Error::PrintUnsupported)
    }

    /// Kind-specific setup after a non-zero handle has been assigned.
    fn on_new_handle(&mut self, handle: RawHandle) {
        let _ = handle;
    }

    /// Bump the foreign reference count of the object at `handle`.
    ///
    /// Kinds without a foreign reference count leave this as a no-op.
    fn add_ref(&self, handle: RawHandle) {
        let _ = handle;
    }
}

/// A resource kind described by C function pointers.
///
/// # Example
///
/// ```no_run
/// use native_handle::{FnResource, RawHandle, Wrapped};
/// # unsafe extern "C" fn widget_free(_h: *mut std::os::raw::c_void) {}
/// # let raw = RawHandle::from(0x1000);
/// let kind = FnResource::new("widget", widget_free);
/// let mut w = unsafe { Wrapped::from_raw(kind, raw, true) };
/// w.dispose();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnResource {
    name: &'static str,
    release: ReleaseFn,
    print: Option<PrintFn>,
    references: Option<(ReferenceLayout, IncrementFn)>,
}

impl FnResource {
    /// Create a kind with only a release routine.
    pub const fn new(name: &'static str, release: ReleaseFn) -> Self {
        Self {
            name,
            release,
            print: None,
            references: None,
        }
    }

    /// Attach a print routine.
    pub const fn with_print(mut self, print: PrintFn) -> Self {
        self.print = Some(print);
        self
    }

    /// Attach a reference counter location and the library's increment.
    pub const fn with_references(mut self, layout: ReferenceLayout, increment: IncrementFn) -> Self {
        self.references = Some((layout, increment));
        self
    }
}

impl ForeignResource for FnResource {
    fn kind(&self) -> &str {
        self.name
    }

    fn release(&mut self, handle: RawHandle) {
        // SAFETY: Wrapped only hands out handles its creator vouched for.
        unsafe { (self.release)(handle.as_ptr()) }
    }

    fn print(&self, handle: RawHandle, out: &mut ScratchBuffer) -> Result<()> {
        let print = self.print.ok_or(Error::PrintUnsupported)?;
        // SAFETY: the print routine was registered for this kind.
        unsafe { out.print_foreign(print, handle) }?;
        Ok(())
    }

    fn add_ref(&self, handle: RawHandle) {
        if let Some((layout, increment)) = self.references {
            // SAFETY: the layout was declared for this kind's records.
            match unsafe { refcount::increment_with(layout, handle, increment) } {
                Some(count) => log::trace!("{} {:#x}: references now {}", self.name, handle, count),
                None => log::warn!(
                    "{} {:#x}: reference counter at offset {} is not addressable, increment lost",
                    self.name,
                    handle,
                    layout.offset()
                ),
            }
        }
    }
}
