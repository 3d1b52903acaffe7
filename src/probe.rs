//! Read-only filesystem probes.
//!
//! Resolution only ever asks "does this path exist?". The question goes through
//! the [`Probe`] trait so callers can answer it from memory in tests.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// Path existence checker.
///
/// `Ok(false)` means the path is absent. Any other failure must be an `Err`,
/// never a silent `false`.
pub trait Probe: Send + Sync {
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl Probe for FsProbe {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }
}

/// In-memory probe with a fixed set of present paths.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    present: HashSet<PathBuf>,
    failing: HashSet<PathBuf>,
}

impl StaticProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a path as present.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.present.insert(path.into());
        self
    }

    /// Make probes of `path` fail with `PermissionDenied`.
    pub fn with_failure(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing.insert(path.into());
        self
    }
}

impl Probe for StaticProbe {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        if self.failing.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("probe of {} denied", path.display()),
            ));
        }
        Ok(self.present.contains(path))
    }
}
