//! Shared test fixtures: a resource kind that records what happens to it.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use native_handle::{ForeignResource, RawHandle, Result, ScratchBuffer, Wrapped};

/// How the recorder's print routine behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// Write `rec@<addr>`.
    Ok,
    /// Report a foreign failure.
    Fail,
    /// Write bytes that are not UTF-8.
    Garbage,
    /// Panic.
    Panic,
}

/// Resource kind that logs releases, prints and adoptions.
#[derive(Debug, Clone)]
pub struct Recorder {
    pub released: Arc<Mutex<Vec<usize>>>,
    pub printed: Arc<Mutex<usize>>,
    pub adopted: Arc<Mutex<Vec<usize>>>,
    pub print_mode: PrintMode,
    pub panic_on_release: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            released: Arc::new(Mutex::new(Vec::new())),
            printed: Arc::new(Mutex::new(0)),
            adopted: Arc::new(Mutex::new(Vec::new())),
            print_mode: PrintMode::Ok,
            panic_on_release: false,
        }
    }

    pub fn with_print_mode(mut self, mode: PrintMode) -> Self {
        self.print_mode = mode;
        self
    }

    pub fn releases(&self) -> Vec<usize> {
        self.released.lock().unwrap().clone()
    }

    pub fn print_calls(&self) -> usize {
        *self.printed.lock().unwrap()
    }

    pub fn adoptions(&self) -> Vec<usize> {
        self.adopted.lock().unwrap().clone()
    }

    /// Wrap `addr` with a clone of this recorder.
    pub fn wrap(&self, addr: usize, owner: bool) -> Wrapped<Recorder> {
        unsafe { Wrapped::from_raw(self.clone(), RawHandle::from(addr), owner) }
    }
}

impl ForeignResource for Recorder {
    fn kind(&self) -> &str {
        "recorder"
    }

    fn release(&mut self, handle: RawHandle) {
        self.released.lock().unwrap().push(handle.addr());
        if self.panic_on_release {
            panic!("release of {:#x} failed", handle);
        }
    }

    fn print(&self, handle: RawHandle, out: &mut ScratchBuffer) -> Result<()> {
        *self.printed.lock().unwrap() += 1;
        match self.print_mode {
            PrintMode::Ok => out.write_str(&format!("rec@{:#x}", handle)),
            PrintMode::Fail => Err(native_handle::Error::PrintFailed { code: -1 }),
            PrintMode::Garbage => out.write_bytes(&[0xc3, 0x28]),
            PrintMode::Panic => panic!("print exploded"),
        }
    }

    fn on_new_handle(&mut self, handle: RawHandle) {
        self.adopted.lock().unwrap().push(handle.addr());
    }
}
