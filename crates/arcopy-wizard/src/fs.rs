//! Disk volume path discovery.
//!
//! Populates the directory choices offered when a copy archives to disk.
//! The walk tolerates unreadable subtrees; only the deadline is fatal.

use std::path::{Path, PathBuf};
use std::time::Duration;

use arcopy_policy::LookupFailure;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Directory depth searched below the root when none is configured.
const DEFAULT_MAX_DEPTH: usize = 3;

/// Failure code reported when the scan task itself dies.
const SCAN_TASK_CODE: i32 = -2;

/// Enumerates directories that can back disk archive volumes.
#[derive(Debug, Clone)]
pub struct DiskVolumeScanner {
    root: PathBuf,
    max_depth: usize,
}

impl DiskVolumeScanner {
    /// Scanner rooted at `root` with the default depth.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit the walk to `max_depth` levels below the root.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate directories below the root, sorted by name. Hidden entries
    /// and unreadable subtrees are skipped.
    #[must_use]
    pub fn scan(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(self.max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry))
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_dir())
            .map(DirEntry::into_path)
            .collect()
    }

    /// Run the scan on the blocking pool, bounded by `deadline`.
    ///
    /// # Errors
    ///
    /// `LookupFailure` with the reserved timeout code when the deadline
    /// elapses, or with the task failure detail when the blocking task dies.
    pub async fn scan_with_deadline(
        &self,
        deadline: Duration,
    ) -> Result<Vec<PathBuf>, LookupFailure> {
        let scanner = self.clone();
        let walk = tokio::task::spawn_blocking(move || scanner.scan());
        match tokio::time::timeout(deadline, walk).await {
            Ok(Ok(paths)) => Ok(paths),
            Ok(Err(join)) => Err(LookupFailure::new(
                SCAN_TASK_CODE,
                format!("scan task failed: {join}"),
            )),
            Err(_) => {
                warn!(root = %self.root.display(), "disk volume scan timed out");
                Err(LookupFailure::timeout())
            }
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
