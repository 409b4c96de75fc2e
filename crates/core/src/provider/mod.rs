//! The external provider contract: the asynchronous entity that actually
//! produces bytes for the backend.
//!
//! The protocol is deliberately split in two. The current offset travels
//! out-of-band: every seek pushes the new cursor to the provider as a
//! formatted hex string through a synchronous notification. Only the byte
//! count travels with the asynchronous fetch itself. A provider therefore
//! has to remember the last offset it was notified with; `fetch` never
//! receives one.

mod memory;

pub use memory::MemoryProvider;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider fetches.
///
/// The read bridge folds every variant into the same failure sentinel; the
/// taxonomy exists for provider implementations and their logs, not for the
/// engine.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No byte source is reachable at the current offset.
    #[error("byte source unreachable")]
    Unreachable,

    /// A notified offset string did not decode as a 64-bit offset.
    #[error("malformed offset string: {0:?}")]
    BadOffset(String),

    /// The underlying fetch failed (network error, callback exception,
    /// resource exhaustion).
    #[error("fetch failed: {0}")]
    Fetch(String),
}

/// Convenience result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Asynchronous byte source consulted by the read bridge.
#[async_trait]
pub trait ByteProvider: Send + Sync {
    /// Synchronous, non-suspending acknowledgement of a new cursor value in
    /// wire form (`0x`-prefixed lowercase hex).
    fn notify_offset(&self, offset_hex: &str);

    /// Produce up to `count` bytes starting at the last notified offset.
    ///
    /// Returning fewer bytes than requested is legal (end of stream).
    /// Errors surface to the engine as a plain failed read with no further
    /// detail, and are not retried.
    async fn fetch(&self, count: usize) -> ProviderResult<Vec<u8>>;
}
