use std::sync::Mutex;

use async_trait::async_trait;
use log::debug;

use super::{ByteProvider, ProviderResult};
use crate::offset::parse_hex_offset;

/// In-memory reference provider.
///
/// Serves a fixed byte buffer, keeping a cursor that moves only when the
/// backend notifies a new offset. Useful in tests and as a template for
/// real providers; a fetch past the end of the buffer is a short (possibly
/// empty) read, not an error.
pub struct MemoryProvider {
    bytes: Vec<u8>,
    cursor: Mutex<u64>,
}

impl MemoryProvider {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes, cursor: Mutex::new(0) }
    }

    /// Last offset this provider was notified with.
    pub fn cursor(&self) -> u64 {
        *self.cursor.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ByteProvider for MemoryProvider {
    fn notify_offset(&self, offset_hex: &str) {
        match parse_hex_offset(offset_hex) {
            Ok(off) => *self.cursor.lock().unwrap_or_else(|e| e.into_inner()) = off,
            // Keep the previous cursor; a malformed notification only shows
            // up in logs.
            Err(err) => debug!("ignoring offset notification: {err}"),
        }
    }

    async fn fetch(&self, count: usize) -> ProviderResult<Vec<u8>> {
        let start = *self.cursor.lock().unwrap_or_else(|e| e.into_inner());
        if start >= self.bytes.len() as u64 {
            return Ok(Vec::new());
        }
        let start = start as usize;
        let end = start.saturating_add(count).min(self.bytes.len());
        Ok(self.bytes[start..end].to_vec())
    }
}
