//! Type definitions and options.

use crate::buffer::DEFAULT_CAPACITY;

/// Text produced for a wrapper holding no handle.
pub const EMPTY_MARKER: &str = "(null)";

/// Text produced when the foreign state could not be rendered.
pub const UNAVAILABLE_MARKER: &str = "(unavailable)";

/// Lifecycle state of a [`Wrapped`](crate::Wrapped) handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleState {
    /// No handle is held.
    Empty,
    /// A handle is held and will be released by this wrapper.
    Owned,
    /// A handle is held but belongs to someone else.
    Borrowed,
    /// Disposal has run and no handle has been assigned since.
    Disposed,
}

impl HandleState {
    /// Check if a foreign handle is currently held.
    pub fn is_live(&self) -> bool {
        matches!(self, HandleState::Owned | HandleState::Borrowed)
    }
}

impl std::fmt::Display for HandleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandleState::Empty => "empty",
            HandleState::Owned => "owned",
            HandleState::Borrowed => "borrowed",
            HandleState::Disposed => "disposed",
        };
        f.write_str(s)
    }
}

/// Options for rendering a handle as text.
#[derive(Debug, Clone)]
pub struct PrintOptions {
    /// Scratch buffer capacity in bytes.
    pub capacity: usize,
    /// Returned when the handle is zero; the print routine is not consulted.
    pub empty_marker: String,
    /// Returned when rendering fails for any reason.
    pub unavailable_marker: String,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            empty_marker: EMPTY_MARKER.to_string(),
            unavailable_marker: UNAVAILABLE_MARKER.to_string(),
        }
    }
}
