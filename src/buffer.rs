//! Scratch buffer for diagnostic rendering.

use std::os::raw::c_char;

use crate::error::{Error, Result};
use crate::ffi::{self, PrintFn, RawHandle};

/// Default scratch capacity in bytes.
pub const DEFAULT_CAPACITY: usize = 4096;

/// A bounded byte buffer a print collaborator renders into.
///
/// Rust-side collaborators append with [`write_str`](Self::write_str) or
/// through [`std::fmt::Write`]; foreign routines fill it through
/// [`print_foreign`](Self::print_foreign).
#[derive(Debug)]
pub struct ScratchBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl ScratchBuffer {
    /// Create an empty buffer holding at most `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of bytes this buffer accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Discard the contents.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if self.data.len() + bytes.len() > self.capacity {
            return Err(Error::BufferOverflow {
                capacity: self.capacity,
            });
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Append text.
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Read the contents back as text, leaving the buffer empty.
    pub fn read_text(&mut self) -> Result<String> {
        let bytes = std::mem::take(&mut self.data);
        self.data.reserve(self.capacity);
        Ok(String::from_utf8(bytes)?)
    }

    /// Let a foreign print routine render `handle` into the unused space.
    ///
    /// # Safety
    ///
    /// `print` must accept `handle` and write at most the offered number of
    /// bytes, terminator included, into the buffer it is given.
    pub unsafe fn print_foreign(&mut self, print: PrintFn, handle: RawHandle) -> Result<usize> {
        let start = self.data.len();
        let room = self.capacity - start;
        self.data.resize(self.capacity, 0);

        let code = print(
            handle.as_ptr(),
            self.data.as_mut_ptr().add(start) as *mut c_char,
            room,
        );

        match ffi::check_print(code, room) {
            Ok(written) => {
                self.data.truncate(start + written);
                Ok(written)
            }
            Err(e) => {
                self.data.truncate(start);
                Err(e)
            }
        }
    }
}

impl Default for ScratchBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Write for ScratchBuffer {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        ScratchBuffer::write_str(self, s).map_err(|_| std::fmt::Error)
    }
}
