//! Handle types for opaque references to foreign objects.
//!
//! Each handle type is a newtype wrapper around a foreign address to provide
//! type safety. Zero is the "no resource" sentinel.

use std::os::raw::c_void;

/// Macro to define a handle type.
macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            _h: usize,
        }

        impl $name {
            /// Create an invalid (null) handle.
            #[inline]
            pub const fn invalid() -> Self {
                Self { _h: 0 }
            }

            /// Wrap a raw address.
            #[inline]
            pub const fn from_addr(addr: usize) -> Self {
                Self { _h: addr }
            }

            /// Get the raw address.
            #[inline]
            pub const fn addr(&self) -> usize {
                self._h
            }

            /// Check if this handle is valid (non-zero).
            #[inline]
            pub const fn is_valid(&self) -> bool {
                self._h != 0
            }

            /// Wrap a foreign pointer.
            #[inline]
            pub fn from_ptr<T>(ptr: *mut T) -> Self {
                Self { _h: ptr as usize }
            }

            /// View the handle as an untyped foreign pointer.
            #[inline]
            pub fn as_ptr(&self) -> *mut c_void {
                self._h as *mut c_void
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl From<usize> for $name {
            fn from(addr: usize) -> Self {
                Self::from_addr(addr)
            }
        }

        impl std::fmt::LowerHex for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::LowerHex::fmt(&self._h, f)
            }
        }
    };
}

define_handle!(
    /// Opaque address of a foreign-allocated resource.
    RawHandle
);
