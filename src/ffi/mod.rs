//! Low-level foreign interface types.
//!
//! This module contains the raw handle newtype and the C ABI signatures of
//! the collaborator routines. Users should prefer the safe wrappers in the
//! parent modules.

pub mod error;
pub mod handles;
pub mod raw;

pub use error::check_print;
pub use handles::*;
pub use raw::*;
