//! Engine-side IO abstraction.
//!
//! This module defines the operation set a hosting analysis engine expects
//! from a pluggable IO backend: probe by URI, open a descriptor, read and
//! seek against it, close it again. Return types deliberately preserve the
//! engine's sentinel conventions (a missing descriptor, a negative byte
//! count, a false boolean) instead of wrapping them in richer errors; the
//! session layer is where sentinels get names.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use bitflags::bitflags;

/// Seek anchors, matching the engine's numeric `whence` encoding.
///
/// `seek` takes the raw integer rather than an enum so that unrecognized
/// values can be carried through as a tolerated no-op instead of a hard
/// error.
pub const SEEK_SET: i32 = 0;
pub const SEEK_CUR: i32 = 1;
pub const SEEK_END: i32 = 2;

bitflags! {
    /// Access permissions requested at open time / granted on a descriptor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Permissions: u8 {
        const READ = 0b001;
        const WRITE = 0b010;
        const EXEC = 0b100;
    }
}

/// Engine-visible handle produced by `open`, consumed by read/seek/close.
///
/// A descriptor records what it was opened with plus an opaque
/// backend-private payload. It does *not* track an offset: the single
/// logical cursor lives with the backend's offset register and is shared by
/// every descriptor that backend hands out.
pub struct Descriptor {
    uri: String,
    perm: Permissions,
    mode: u32,
    payload: Option<Box<dyn Any + Send>>,
}

impl Descriptor {
    pub fn new(
        uri: impl Into<String>,
        perm: Permissions,
        mode: u32,
        payload: Box<dyn Any + Send>,
    ) -> Self {
        Self { uri: uri.into(), perm, mode, payload: Some(payload) }
    }

    /// URI this descriptor was opened with.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Permissions granted by the backend (not necessarily those requested).
    pub fn perm(&self) -> Permissions {
        self.perm
    }

    /// Open mode as passed through from the engine.
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Whether the backend-private payload is still attached.
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Detach the backend-private payload.
    ///
    /// Returns `None` if the payload was already released. Backends treat
    /// that as a tolerated double-close, not an error.
    pub fn take_payload(&mut self) -> Option<Box<dyn Any + Send>> {
        self.payload.take()
    }
}

/// Operation set implemented by IO backends.
///
/// `read` is the only suspending operation in the set; everything else
/// completes synchronously. The hosting engine serializes calls into a
/// backend: no two read/seek calls are in flight at once, and a seek is
/// fully returned (provider notified) before the next read is issued.
#[async_trait]
pub trait IoBackend: Send + Sync {
    /// Short identifier used in listings.
    fn name(&self) -> &'static str;

    /// Returns true iff this backend can service `pathname`.
    ///
    /// Total over arbitrary input; never fails.
    fn check(&self, pathname: &str) -> bool;

    /// Open a descriptor for `pathname`.
    ///
    /// `None` only when the backend could not allocate its private payload.
    fn open(&self, pathname: &str, perm: Permissions, mode: u32) -> Option<Descriptor>;

    /// Release the descriptor's private payload.
    ///
    /// Always reports success; releasing twice is a caller error the backend
    /// tolerates rather than crashes on.
    fn close(&self, desc: &mut Descriptor) -> bool;

    /// Fill `buf` from the backing stream at the currently registered offset.
    ///
    /// Returns the number of bytes copied (`0..=buf.len()`; short reads are
    /// legal and not retried) or -1 on failure, in which case `buf` is left
    /// untouched.
    async fn read(&self, desc: &mut Descriptor, buf: &mut [u8]) -> isize;

    /// Write `buf` to the backing stream. Read-only backends return -1
    /// unconditionally.
    fn write(&self, desc: &mut Descriptor, buf: &[u8]) -> isize;

    /// Move the cursor per `whence` and return the new offset.
    ///
    /// Unrecognized `whence` values leave the offset unchanged and still
    /// return it.
    fn seek(&self, desc: &mut Descriptor, offset: u64, whence: i32) -> u64;

    /// Resize the backing stream; false when unsupported.
    fn resize(&self, desc: &mut Descriptor, size: u64) -> bool;
}

/// Registry of IO backends; a URI resolves to the first backend whose
/// `check` accepts it.
#[derive(Default, Clone)]
pub struct BackendRegistry {
    backends: Vec<Arc<dyn IoBackend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self { backends: Vec::new() }
    }

    pub fn register<B: IoBackend + 'static>(&mut self, backend: B) -> &mut Self {
        self.backends.push(Arc::new(backend));
        self
    }

    /// Resolve a URI to the backend that will service it.
    pub fn resolve(&self, uri: &str) -> Option<Arc<dyn IoBackend>> {
        self.backends.iter().find(|b| b.check(uri)).cloned()
    }

    /// Registered backend names, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }
}
