//! File backend.
//!
//! Each `SinkId` is a path.  Relative ids resolve against the sink's root
//! directory; absolute ids are used as-is.  Files are opened per operation,
//! so the driver never holds a handle across a sleep and an external
//! truncation or rotation is picked up on the next write.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use lr_core::SinkId;
use tracing::trace;

use crate::sink::Sink;
use crate::{SinkError, SinkResult};

/// Writes each stream to its own file.
#[derive(Clone, Debug)]
pub struct FileSink {
    root:        PathBuf,
    create_dirs: bool,
    sync:        bool,
}

impl FileSink {
    /// A sink resolving relative ids against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:        root.into(),
            create_dirs: false,
            sync:        false,
        }
    }

    /// Create missing parent directories on `clear`.  Default: off.
    pub fn create_dirs(mut self, on: bool) -> Self {
        self.create_dirs = on;
        self
    }

    /// `fsync` file data after every append.  Default: off. A flushed write
    /// is already visible to readers on the same host.
    pub fn sync(mut self, on: bool) -> Self {
        self.sync = on;
        self
    }

    /// Filesystem path for `sink`.
    pub fn path_for(&self, sink: &SinkId) -> PathBuf {
        self.root.join(Path::new(sink.as_str()))
    }

    fn open_append(&self, path: &Path) -> std::io::Result<File> {
        OpenOptions::new().create(true).append(true).open(path)
    }
}

impl Sink for FileSink {
    fn append(&self, sink: &SinkId, text: &str) -> SinkResult<()> {
        let path = self.path_for(sink);
        let io_err = |source| SinkError::Io { sink: sink.clone(), op: "append", source };

        let mut buf = String::with_capacity(text.len() + 1);
        buf.push_str(text);
        buf.push('\n');

        let mut file = self.open_append(&path).map_err(io_err)?;
        file.write_all(buf.as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)?;
        if self.sync {
            file.sync_data().map_err(io_err)?;
        }
        trace!(path = %path.display(), bytes = buf.len(), "appended");
        Ok(())
    }

    fn clear(&self, sink: &SinkId) -> SinkResult<()> {
        let path = self.path_for(sink);
        let io_err = |source| SinkError::Io { sink: sink.clone(), op: "clear", source };

        if self.create_dirs {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(io_err)?;
        trace!(path = %path.display(), "truncated");
        Ok(())
    }
}
