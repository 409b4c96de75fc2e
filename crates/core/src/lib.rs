//! tether-core
//!
//! Core library bridging a binary-analysis session's pluggable IO layer to a
//! remote, asynchronously fetched byte stream.
//!
//! The engine side sees an ordinary IO backend: pick a backend by URI scheme,
//! open a descriptor, read bytes, seek, close. Internally every read is
//! delegated to an external [`provider::ByteProvider`], and the current
//! cursor is kept synchronized with that provider through a formatted hex
//! string rather than a shared integer: offsets travel out-of-band through
//! [`provider::ByteProvider::notify_offset`] at seek time, byte counts travel
//! in-band with each fetch.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, embedding hosts, etc.).

pub mod backends;
pub mod io;
pub mod offset;
pub mod provider;
pub mod session;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
