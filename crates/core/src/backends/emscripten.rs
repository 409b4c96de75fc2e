//! The `emscripten://` backend: a virtual block device whose bytes come
//! from an external asynchronous provider.
//!
//! The backend owns the offset register. Seek mutates the register and
//! synchronously pushes the new wire-form value to the provider; read then
//! fetches with a byte count only, trusting the provider to address the
//! bytes from the last notification it received.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::{debug, trace};

use crate::io::{Descriptor, IoBackend, Permissions, SEEK_CUR, SEEK_END, SEEK_SET};
use crate::offset::OffsetRegister;
use crate::provider::ByteProvider;

/// URI scheme prefix serviced by [`EmscriptenBackend`].
pub const SCHEME: &str = "emscripten://";

/// Backend-private descriptor payload.
///
/// An empty marker: no connection is established at open time. The provider
/// is assumed already reachable, and reachability is only discovered on the
/// first read.
struct RemoteHandle;

/// IO backend bridging the engine to an external [`ByteProvider`].
pub struct EmscriptenBackend {
    provider: Arc<dyn ByteProvider>,
    register: Mutex<OffsetRegister>,
}

impl EmscriptenBackend {
    pub fn new(provider: Arc<dyn ByteProvider>) -> Self {
        Self { provider, register: Mutex::new(OffsetRegister::new()) }
    }

    /// Current value of the offset register.
    pub fn offset(&self) -> u64 {
        self.register.lock().unwrap_or_else(|e| e.into_inner()).value()
    }
}

#[async_trait]
impl IoBackend for EmscriptenBackend {
    fn name(&self) -> &'static str {
        "emscripten"
    }

    fn check(&self, pathname: &str) -> bool {
        pathname.starts_with(SCHEME)
    }

    fn open(&self, pathname: &str, _perm: Permissions, mode: u32) -> Option<Descriptor> {
        // Every descriptor is granted full access regardless of the request;
        // enforcing restrictions is the hosting engine's concern.
        let payload = Box::new(RemoteHandle);
        Some(Descriptor::new(pathname, Permissions::all(), mode, payload))
    }

    fn close(&self, desc: &mut Descriptor) -> bool {
        // take_payload is a no-op once the payload is gone, so a double
        // close falls through harmlessly.
        drop(desc.take_payload());
        true
    }

    async fn read(&self, _desc: &mut Descriptor, buf: &mut [u8]) -> isize {
        let count = buf.len();
        match self.provider.fetch(count).await {
            Ok(bytes) => {
                let n = bytes.len().min(count);
                buf[..n].copy_from_slice(&bytes[..n]);
                trace!("read {n} of {count} requested bytes");
                n as isize
            }
            Err(err) => {
                debug!("provider fetch failed: {err}");
                -1
            }
        }
    }

    fn write(&self, _desc: &mut Descriptor, _buf: &[u8]) -> isize {
        -1
    }

    fn seek(&self, _desc: &mut Descriptor, offset: u64, whence: i32) -> u64 {
        let mut register = self.register.lock().unwrap_or_else(|e| e.into_inner());
        match whence {
            SEEK_SET => register.set(offset),
            SEEK_CUR => register.advance(offset),
            // There is no known stream length; the maximum offset signals
            // "unbounded end" to callers.
            SEEK_END => register.set(u64::MAX),
            // Unrecognized whence: leave the offset where it is.
            _ => {}
        }

        let mirror = register.to_hex();
        self.provider.notify_offset(&mirror);
        trace!("seek -> {mirror}");

        register.value()
    }

    fn resize(&self, _desc: &mut Descriptor, _size: u64) -> bool {
        false
    }
}
