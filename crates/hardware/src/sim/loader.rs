//! Workload lookup.
//!
//! The simulated CPU runs a single executable in syscall-emulation mode. This module checks
//! that the executable exists and records the command line it is started with.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::common::{AssemblyError, Result};

/// An executable workload and its argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workload {
    path: PathBuf,
    args: Vec<String>,
}

impl Workload {
    /// Locates the executable at `path`.
    ///
    /// # Errors
    ///
    /// `WorkloadNotFound` if `path` does not exist or is not a regular file.
    pub fn locate(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => {
                debug!(path = %path.display(), bytes = meta.len(), "workload located");
                Ok(Self {
                    path: path.to_path_buf(),
                    args: Vec::new(),
                })
            }
            _ => Err(AssemblyError::WorkloadNotFound {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Appends arguments passed to the workload after its own path.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Path to the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full command line: the executable path followed by its arguments.
    pub fn cmd(&self) -> Vec<String> {
        std::iter::once(self.path.display().to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }
}
