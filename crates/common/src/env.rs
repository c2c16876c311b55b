//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the router is built.

use std::path::Path;

use tracing::warn;

/// Check the medicines data file.
///
/// A missing file only produces a warning: the service still starts, and
/// requests that need the data file fail until it exists. The data file's
/// parent directory is created so an operator can drop the file in place.
pub async fn ensure_env(data_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    if tokio::fs::metadata(data_file).await.is_err() {
        warn!(data_file = %data_file.display(), "medicines data file not found; requests will fail until it exists");
    }
    Ok(())
}
