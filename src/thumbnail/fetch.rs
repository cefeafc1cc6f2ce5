//! Cover art download

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::cache::CoverGuard;
use crate::errors::{AppError, AppResult};

/// Download a cover image into the cache directory
///
/// The body is capped at `max_bytes`; anything larger is rejected before it
/// is written. The returned guard removes the file when dropped.
pub async fn download_cover(
    http: &reqwest::Client,
    url: &str,
    dest: &Path,
    max_bytes: u64,
) -> AppResult<CoverGuard> {
    let response = http.get(url).send().await?;

    if !response.status().is_success() {
        return Err(AppError::Network(format!(
            "cover download returned {} for {}",
            response.status(),
            url
        )));
    }

    // Check Content-Length first to avoid pulling oversized bodies
    if let Some(content_length) = response.content_length() {
        if content_length > max_bytes {
            return Err(AppError::Validation(format!(
                "cover too large: {} bytes (maximum allowed: {} bytes)",
                content_length, max_bytes
            )));
        }
    }

    let bytes = response.bytes().await?;
    if bytes.len() as u64 > max_bytes {
        return Err(AppError::Validation(format!(
            "cover too large: {} bytes (maximum allowed: {} bytes)",
            bytes.len(),
            max_bytes
        )));
    }

    let parent = dest
        .parent()
        .ok_or_else(|| AppError::FileSystem(format!("no parent directory for {}", dest.display())))?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.as_file_mut().write_all(&bytes)?;
    temp_file
        .persist(dest)
        .map_err(|e| AppError::FileSystem(format!("persisting {}: {}", dest.display(), e)))?;

    debug!(url = %url, dest = %dest.display(), bytes = bytes.len(), "Cover downloaded");
    Ok(CoverGuard::new(dest.to_path_buf()))
}
