//! Engine-side session harness: descriptor table and dispatch.
//!
//! The hosting engine owns descriptor lifecycle and call ordering. This
//! module renders that contract small enough to drive and test: a table of
//! open descriptors, an engine-side offset field fed by seek returns, and
//! the translation of backend sentinels into named errors. Backends never
//! format user-facing messages themselves.

use std::collections::HashMap;
use std::sync::Arc;

use log::info;
use thiserror::Error;

use crate::io::{BackendRegistry, Descriptor, IoBackend, Permissions};

/// Error type for session-level operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No registered backend accepted the URI.
    #[error("no backend accepts {0:?}")]
    NoBackend(String),

    /// The backend refused to produce a descriptor.
    #[error("open failed for {0:?}")]
    OpenFailed(String),

    /// The file descriptor does not name an open descriptor.
    #[error("unknown file descriptor {0}")]
    BadFd(i32),
}

/// Convenience result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

struct OpenEntry {
    backend: Arc<dyn IoBackend>,
    desc: Descriptor,
}

/// A serialized IO session over a set of registered backends.
///
/// All calls go through `&mut self`, matching the engine model of a single
/// cooperative context: at most one operation (and one read suspension) is
/// in flight at a time, so a seek's provider notification is always complete
/// before the next read starts.
pub struct IoSession {
    registry: BackendRegistry,
    entries: HashMap<i32, OpenEntry>,
    next_fd: i32,
    off: u64,
}

impl IoSession {
    pub fn new(registry: BackendRegistry) -> Self {
        // fds below 3 stay reserved for the conventional stdio triple.
        Self { registry, entries: HashMap::new(), next_fd: 3, off: 0 }
    }

    /// Engine-side cursor, tracking the most recent seek return value.
    pub fn offset(&self) -> u64 {
        self.off
    }

    /// URI the descriptor was opened with.
    pub fn uri(&self, fd: i32) -> SessionResult<&str> {
        self.entries.get(&fd).map(|e| e.desc.uri()).ok_or(SessionError::BadFd(fd))
    }

    /// Permissions granted on the descriptor.
    pub fn perm(&self, fd: i32) -> SessionResult<Permissions> {
        self.entries.get(&fd).map(|e| e.desc.perm()).ok_or(SessionError::BadFd(fd))
    }

    /// Registered backend names (for listings).
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    /// Open `uri` through the first backend that accepts it and return the
    /// newly assigned file descriptor.
    pub fn open(&mut self, uri: &str, perm: Permissions, mode: u32) -> SessionResult<i32> {
        let backend =
            self.registry.resolve(uri).ok_or_else(|| SessionError::NoBackend(uri.to_string()))?;
        let desc = backend
            .open(uri, perm, mode)
            .ok_or_else(|| SessionError::OpenFailed(uri.to_string()))?;

        let fd = self.next_fd;
        self.next_fd += 1;
        info!("opened {uri} as fd {fd} via {}", backend.name());
        self.entries.insert(fd, OpenEntry { backend, desc });
        Ok(fd)
    }

    /// Read into `buf` at the currently registered offset.
    ///
    /// Returns the byte count or -1, exactly as the backend reported it.
    pub async fn read(&mut self, fd: i32, buf: &mut [u8]) -> SessionResult<isize> {
        let entry = self.entries.get_mut(&fd).ok_or(SessionError::BadFd(fd))?;
        Ok(entry.backend.read(&mut entry.desc, buf).await)
    }

    /// Write through the descriptor's backend; read-only backends report -1.
    pub fn write(&mut self, fd: i32, buf: &[u8]) -> SessionResult<isize> {
        let entry = self.entries.get_mut(&fd).ok_or(SessionError::BadFd(fd))?;
        Ok(entry.backend.write(&mut entry.desc, buf))
    }

    /// Seek and record the engine-side offset from the backend's return.
    pub fn seek(&mut self, fd: i32, offset: u64, whence: i32) -> SessionResult<u64> {
        let entry = self.entries.get_mut(&fd).ok_or(SessionError::BadFd(fd))?;
        self.off = entry.backend.seek(&mut entry.desc, offset, whence);
        Ok(self.off)
    }

    /// Resize the stream; false when the backend does not support it.
    pub fn resize(&mut self, fd: i32, size: u64) -> SessionResult<bool> {
        let entry = self.entries.get_mut(&fd).ok_or(SessionError::BadFd(fd))?;
        Ok(entry.backend.resize(&mut entry.desc, size))
    }

    /// Close and remove the descriptor.
    ///
    /// Unknown fds are a [`SessionError::BadFd`]; closing a live descriptor
    /// always succeeds.
    pub fn close(&mut self, fd: i32) -> SessionResult<bool> {
        let mut entry = self.entries.remove(&fd).ok_or(SessionError::BadFd(fd))?;
        Ok(entry.backend.close(&mut entry.desc))
    }
}
