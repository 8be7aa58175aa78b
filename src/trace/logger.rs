use std::cell::{Cell, RefCell};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::trace::trace::TraceEvent;

/// JSONL sink for tree construction events, owned by a single
/// [`FormContext`](crate::structure::context::FormContext).
///
/// The first failed write is reported on stderr and switches the logger
/// off; building the tree never fails because of tracing.
#[derive(Debug)]
pub struct TraceLogger {
    path: PathBuf,
    file: RefCell<Option<File>>,
    written: Cell<usize>,
}

impl TraceLogger {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: RefCell::new(Some(file)),
            written: Cell::new(0),
        })
    }

    /// Like [`open`](Self::open), but an unopenable path only warns and
    /// yields a disabled logger.
    pub fn new(path: &str) -> Self {
        Self::open(path).unwrap_or_else(|e| {
            eprintln!("Warning: could not open trace file '{}': {}", path, e);
            Self {
                path: PathBuf::from(path),
                ..Self::disabled()
            }
        })
    }

    pub fn disabled() -> Self {
        Self {
            path: PathBuf::new(),
            file: RefCell::new(None),
            written: Cell::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.borrow().is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of events written so far.
    pub fn events_written(&self) -> usize {
        self.written.get()
    }

    /// Writes the event produced by `build`. The closure only runs while
    /// the logger is enabled.
    pub fn record(&self, build: impl FnOnce() -> TraceEvent) {
        let mut slot = self.file.borrow_mut();
        let Some(file) = slot.as_mut() else {
            return;
        };

        let result = serde_json::to_string(&build())
            .map_err(io::Error::from)
            .and_then(|json| writeln!(file, "{}", json));

        match result {
            Ok(()) => self.written.set(self.written.get() + 1),
            Err(e) => {
                eprintln!(
                    "Warning: trace file '{}' failed, tracing disabled: {}",
                    self.path.display(),
                    e
                );
                *slot = None;
            }
        }
    }
}
