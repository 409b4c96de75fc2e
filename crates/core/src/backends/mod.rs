//! IO backend adapters.

pub mod emscripten;

pub use emscripten::{EmscriptenBackend, SCHEME};
