//! Ownership and disposal of wrapped foreign handles.

use std::fmt;
use std::mem;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, trace, warn};

use crate::buffer::ScratchBuffer;
use crate::error::{Error, Result};
use crate::ffi::RawHandle;
use crate::resource::ForeignResource;
use crate::types::{HandleState, PrintOptions};

/// A foreign handle together with the knowledge of who must release it.
///
/// The wrapper releases its handle at most once, through the kind's
/// [`release`](ForeignResource::release), and only while it is the owner.
/// Release happens on [`dispose`](Self::dispose), when the handle is
/// replaced through [`set_handle`](Self::set_handle), or when the wrapper is
/// dropped without having been disposed.
///
/// A disposed wrapper is not dead: assigning it a new handle brings it back
/// to life, borrowed until ownership is asserted again.
///
/// # Threads
///
/// There is no internal locking. Disposal and reassignment take `&mut self`,
/// so a wrapper shared between threads has to sit behind a lock such as
/// `Arc<Mutex<Wrapped<R>>>`.
///
/// # Example
///
/// ```no_run
/// use native_handle::{FnResource, RawHandle, Wrapped};
/// # unsafe extern "C" fn ctx_free(_h: *mut std::os::raw::c_void) {}
/// # unsafe fn ctx_new() -> RawHandle { RawHandle::from(0x1000) }
/// let kind = FnResource::new("ctx", ctx_free);
/// let mut ctx = unsafe { Wrapped::from_raw(kind, ctx_new(), true) };
///
/// // Adopt a different context; the first one is freed here.
/// unsafe { ctx.set_handle(ctx_new()) };
/// assert!(!ctx.is_owner());
/// ctx.set_owner(true);
/// ```
pub struct Wrapped<R: ForeignResource> {
    kind: R,
    handle: RawHandle,
    owner: bool,
    disposed: bool,
    armed: bool,
}

impl<R: ForeignResource> Wrapped<R> {
    /// Wrap `handle`, taking responsibility for releasing it if `take_ownership`.
    ///
    /// The zero handle is accepted and yields an empty wrapper.
    ///
    /// # Safety
    ///
    /// A non-zero `handle` must be a live object of the kind described by
    /// `kind`. If `take_ownership` is set, nothing else may release it.
    pub unsafe fn from_raw(kind: R, handle: RawHandle, take_ownership: bool) -> Self {
        Self {
            kind,
            handle,
            owner: take_ownership,
            disposed: false,
            armed: true,
        }
    }

    /// Get the current handle (zero if none).
    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    /// Check if this wrapper releases its handle.
    pub fn is_owner(&self) -> bool {
        self.owner
    }

    /// Assert or relinquish ownership of the current handle.
    ///
    /// Nothing is released by this call.
    pub fn set_owner(&mut self, owner: bool) {
        self.owner = owner;
    }

    /// Check if disposal has run since the last handle assignment.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Check if dropping this wrapper would still run disposal.
    pub fn is_sweep_armed(&self) -> bool {
        self.armed
    }

    /// Current lifecycle state.
    pub fn state(&self) -> HandleState {
        if self.disposed {
            HandleState::Disposed
        } else if !self.handle.is_valid() {
            HandleState::Empty
        } else if self.owner {
            HandleState::Owned
        } else {
            HandleState::Borrowed
        }
    }

    /// Get the resource kind.
    pub fn kind(&self) -> &R {
        &self.kind
    }

    /// Get the resource kind mutably.
    pub fn kind_mut(&mut self) -> &mut R {
        &mut self.kind
    }

    /// Release the handle if owned, then mark the wrapper disposed.
    ///
    /// Idempotent. A borrowed or empty wrapper is only marked.
    pub fn dispose(&mut self) {
        if !self.disposed && self.owner && self.handle.is_valid() {
            self.release_current();
        } else {
            trace!(
                "{} {:#x}: dispose without release (owner={}, disposed={})",
                self.kind.kind(),
                self.handle,
                self.owner,
                self.disposed
            );
        }
        self.disposed = true;
    }

    /// Replace the handle.
    ///
    /// An owned non-zero handle is released first. The wrapper never owns
    /// the new handle; call [`set_owner`](Self::set_owner) to take it.
    /// Assigning a non-zero handle re-arms the wrapper after a disposal and
    /// runs the kind's [`on_new_handle`](ForeignResource::on_new_handle).
    ///
    /// # Safety
    ///
    /// A non-zero `handle` must be a live object of this wrapper's kind.
    pub unsafe fn set_handle(&mut self, handle: RawHandle) {
        if self.owner && self.handle.is_valid() {
            self.release_current();
        }

        self.owner = false;
        self.handle = handle;

        if handle.is_valid() {
            trace!("{} {:#x}: adopted, sweep re-armed", self.kind.kind(), handle);
            self.disposed = false;
            self.armed = true;
            self.kind.on_new_handle(handle);
        }
    }

    /// Detach the handle without releasing it, leaving the wrapper empty.
    pub fn take(&mut self) -> RawHandle {
        self.owner = false;
        self.armed = false;
        mem::take(&mut self.handle)
    }

    /// Consume the wrapper and hand back the handle without releasing it.
    ///
    /// The caller becomes responsible for the handle.
    pub fn into_raw(mut self) -> RawHandle {
        self.take()
    }

    /// Bump the foreign reference count, if the kind has one.
    ///
    /// Does nothing for the zero handle.
    pub fn add_ref(&self) {
        if self.handle.is_valid() {
            self.kind.add_ref(self.handle);
        }
    }

    /// Render the handle as text, never failing.
    ///
    /// The zero handle yields `opts.empty_marker` without consulting the
    /// kind; any rendering failure yields `opts.unavailable_marker`.
    pub fn describe(&self, opts: &PrintOptions) -> String {
        if !self.handle.is_valid() {
            return opts.empty_marker.clone();
        }

        match self.try_describe(opts) {
            Ok(s) => s,
            Err(e) => {
                warn!("{} {:#x}: cannot render: {}", self.kind.kind(), self.handle, e);
                opts.unavailable_marker.clone()
            }
        }
    }

    /// Render the handle as text, reporting why it could not be done.
    pub fn try_describe(&self, opts: &PrintOptions) -> Result<String> {
        if !self.handle.is_valid() {
            return Err(Error::NullHandle);
        }

        let mut buf = ScratchBuffer::with_capacity(opts.capacity);
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.kind.print(self.handle, &mut buf)
        }))
        .map_err(|_| Error::Panicked)??;

        buf.read_text()
    }

    fn release_current(&mut self) {
        // Zero first so a panicking release cannot be retried by drop.
        let handle = mem::take(&mut self.handle);
        self.armed = false;
        debug!("{} {:#x}: releasing", self.kind.kind(), handle);
        self.kind.release(handle);
    }
}

impl<R: ForeignResource + Clone> Wrapped<R> {
    /// Create a borrowed wrapper over the same handle.
    ///
    /// The copy never releases; this wrapper keeps its ownership.
    pub fn share(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            handle: self.handle,
            owner: false,
            disposed: false,
            armed: true,
        }
    }
}

impl<R: ForeignResource> Drop for Wrapped<R> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        // Nobody is left to observe a failure here.
        if panic::catch_unwind(AssertUnwindSafe(|| self.dispose())).is_err() {
            warn!("{}: release panicked during drop", self.kind.kind());
        }
    }
}

impl<R: ForeignResource> fmt::Display for Wrapped<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(&PrintOptions::default()))
    }
}

impl<R: ForeignResource> fmt::Debug for Wrapped<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped")
            .field("kind", &self.kind.kind())
            .field("handle", &format_args!("{:#x}", self.handle))
            .field("owner", &self.owner)
            .field("disposed", &self.disposed)
            .finish()
    }
}
