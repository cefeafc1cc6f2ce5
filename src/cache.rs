//! Cache directory management for thumbnail files
//!
//! The pipeline leaves two kinds of transient files behind, both keyed by
//! video id:
//!
//! - `cover_<id>.png` — the downloaded cover art, removed as soon as the
//!   composite has been rendered (RAII guard, so failures clean up too)
//! - `<id>_styled.png` — the generated composite, removed by the caller
//!   after it has been sent
//!
//! A periodic sweep removes anything the happy path missed once it is older
//! than the configured TTL.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::errors::{error_logging, AppError, AppResult};

/// Counters accumulated across sweep runs
#[derive(Debug, Clone, Default)]
pub struct SweepStats {
    /// Number of sweep runs performed
    pub runs: u64,
    /// Total files removed by sweeps
    pub removed: u64,
    /// Files that could not be removed
    pub failures: u64,
}

/// Handle to the on-disk cache directory
#[derive(Debug, Clone)]
pub struct CacheDir {
    root: PathBuf,
    stats: Arc<RwLock<SweepStats>>,
}

impl CacheDir {
    /// Open (creating if needed) the cache directory
    pub fn new(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| AppError::FileSystem(format!("creating {}: {}", root.display(), e)))?;
        Ok(Self {
            root,
            stats: Arc::new(RwLock::new(SweepStats::default())),
        })
    }

    /// Root path of the cache directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for a downloaded cover image
    pub fn cover_path(&self, video_id: &str) -> PathBuf {
        self.root.join(format!("cover_{}.png", video_id))
    }

    /// Path for a generated composite
    pub fn styled_path(&self, video_id: &str) -> PathBuf {
        self.root.join(format!("{}_styled.png", video_id))
    }

    /// Best-effort file removal with structured logging
    pub fn remove_file(&self, path: &Path) {
        match std::fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "Cache file removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                error_logging::log_filesystem_error(
                    &e,
                    "remove_cache_file",
                    Some(&path.display().to_string()),
                );
            }
        }
    }

    /// Remove cache files whose modification time is older than `ttl`
    ///
    /// Returns the number of files removed. Unreadable entries are skipped.
    pub fn sweep_stale(&self, ttl: Duration) -> usize {
        let now = SystemTime::now();
        let mut removed = 0usize;
        let mut failures = 0u64;

        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, root = %self.root.display(), "Cache sweep could not read directory");
                return 0;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let modified = match entry.metadata().and_then(|meta| meta.modified()) {
                Ok(modified) => modified,
                Err(_) => continue,
            };

            let age = match now.duration_since(modified) {
                Ok(age) => age,
                Err(_) => continue, // clock moved backwards, leave the file alone
            };

            if age > ttl {
                match std::fs::remove_file(&path) {
                    Ok(()) => {
                        removed += 1;
                        debug!(path = %path.display(), age_secs = age.as_secs(), "Swept stale cache file");
                    }
                    Err(e) => {
                        failures += 1;
                        error_logging::log_filesystem_error(
                            &e,
                            "sweep_cache_file",
                            Some(&path.display().to_string()),
                        );
                    }
                }
            }
        }

        let mut stats = self.stats.write();
        stats.runs += 1;
        stats.removed += removed as u64;
        stats.failures += failures;

        removed
    }

    /// Sweep counters accumulated so far
    pub fn stats(&self) -> SweepStats {
        self.stats.read().clone()
    }
}

/// RAII guard for a downloaded cover file, removed on drop
pub struct CoverGuard {
    path: PathBuf,
}

impl CoverGuard {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Display for CoverGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl AsRef<Path> for CoverGuard {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl Drop for CoverGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Cover file cleaned up in drop"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                error_logging::log_filesystem_error(
                    &e,
                    "cleanup_cover_file",
                    Some(&self.path.display().to_string()),
                );
            }
        }
    }
}
