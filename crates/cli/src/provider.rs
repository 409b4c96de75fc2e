use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use tether_core::offset::parse_hex_offset;
use tether_core::provider::{ByteProvider, ProviderError, ProviderResult};

/// Serves a local file through the asynchronous provider protocol.
///
/// This plays the host-side role of the contract: the backend notifies it of
/// cursor movement out-of-band, and each fetch reads at the last notified
/// position. Filesystem access stays in this frontend; the core never
/// touches a file.
pub struct FileProvider {
    path: PathBuf,
    state: Mutex<FileState>,
}

struct FileState {
    file: File,
    cursor: u64,
}

impl FileProvider {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open stream source: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(FileState { file, cursor: 0 }),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ByteProvider for FileProvider {
    fn notify_offset(&self, offset_hex: &str) {
        match parse_hex_offset(offset_hex) {
            Ok(off) => self.state.lock().unwrap_or_else(|e| e.into_inner()).cursor = off,
            Err(err) => debug!("ignoring offset notification: {err}"),
        }
    }

    async fn fetch(&self, count: usize) -> ProviderResult<Vec<u8>> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let cursor = state.cursor;

        state
            .file
            .seek(SeekFrom::Start(cursor))
            .map_err(|e| ProviderError::Fetch(e.to_string()))?;

        let mut buf = vec![0u8; count];
        let mut filled = 0;
        while filled < count {
            let n = state
                .file
                .read(&mut buf[filled..])
                .map_err(|e| ProviderError::Fetch(e.to_string()))?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        buf.truncate(filled);
        Ok(buf)
    }
}
