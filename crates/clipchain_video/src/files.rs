//! Clip file checks and cleanup.

use futures::future::join_all;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// True when every path exists and is non-empty.
///
/// Stops at the first invalid file. An empty list is valid.
pub async fn validate_files(paths: &[PathBuf]) -> bool {
    for path in paths {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.len() > 0 => {
                debug!(path = %path.display(), bytes = meta.len(), "Valid clip");
            }
            Ok(_) => {
                warn!(path = %path.display(), "Clip is empty");
                return false;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Clip not readable");
                return false;
            }
        }
    }
    true
}

/// Delete files concurrently, logging failures.
///
/// Returns the number of files removed.
pub async fn cleanup(paths: &[PathBuf]) -> usize {
    let results = join_all(paths.iter().map(|path| async move {
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Deleted");
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to delete");
                false
            }
        }
    }))
    .await;

    let removed = results.into_iter().filter(|ok| *ok).count();
    info!(removed, requested = paths.len(), "Cleanup finished");
    removed
}
