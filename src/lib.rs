//! Lifetime management for handles to foreign-allocated resources.
//!
//! A foreign library hands out raw addresses for the objects it allocates
//! (cryptographic contexts, buffers, keys) and expects each one to be freed
//! exactly once through a kind-specific routine. This crate wraps such an
//! address in [`Wrapped`], which tracks whether it owns the handle, releases
//! it at most once, and falls back to releasing on drop if nobody disposed
//! of it explicitly.
//!
//! # Example
//!
//! ```no_run
//! use native_handle::{FnResource, HandleState, RawHandle, Wrapped};
//! # use std::os::raw::{c_char, c_int, c_void};
//! # unsafe extern "C" fn key_free(_h: *mut c_void) {}
//! # unsafe extern "C" fn key_print(_h: *mut c_void, _b: *mut c_char, _n: usize) -> c_int { 0 }
//! # unsafe fn key_new() -> *mut c_void { 0x1000 as *mut c_void }
//!
//! let kind = FnResource::new("key", key_free).with_print(key_print);
//!
//! // Take ownership of a freshly allocated key.
//! let mut key = unsafe { Wrapped::from_raw(kind, RawHandle::from_ptr(key_new()), true) };
//! assert_eq!(key.state(), HandleState::Owned);
//! println!("key: {}", key);
//!
//! // Free it now rather than at end of scope. Further calls do nothing.
//! key.dispose();
//! key.dispose();
//! ```
//!
//! # Ownership
//!
//! Ownership is a flag, not a type: several wrappers may point at the same
//! address, and only those marked as owner release it. Assigning a new
//! handle always leaves the wrapper non-owning.

pub mod buffer;
pub mod error;
pub mod ffi;
pub mod lifecycle;
pub mod refcount;
pub mod resource;
pub mod types;

// Re-export main types at the crate root
pub use buffer::ScratchBuffer;
pub use error::{Error, Result};
pub use ffi::RawHandle;
pub use lifecycle::Wrapped;
pub use refcount::ReferenceLayout;
pub use resource::{FnResource, ForeignResource};
pub use types::{HandleState, PrintOptions, EMPTY_MARKER, UNAVAILABLE_MARKER};
