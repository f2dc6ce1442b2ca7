use reqwest::Client as HttpClient;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::utils::AppError;

/// Outcome of `ensure_snapshot`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotStatus {
    AlreadyPresent,
    Downloaded,
}

/// Download the reference snapshot to `path` unless it already exists.
///
/// The file is written once with the response body verbatim and never
/// refreshed. A non-2xx response leaves the filesystem untouched.
pub async fn ensure_snapshot(
    http_client: &HttpClient,
    url: &str,
    path: &Path,
) -> Result<SnapshotStatus, AppError> {
    if tokio::fs::try_exists(path).await? {
        debug!("Snapshot already present at {}", path.display());
        return Ok(SnapshotStatus::AlreadyPresent);
    }

    info!("Downloading snapshot from {}", url);
    let response = http_client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        warn!("Snapshot download returned {}", status);
        return Err(AppError::SnapshotUnavailable { status: status.as_u16() });
    }

    let body = response.bytes().await?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    // Readers never see a partially written snapshot
    let partial = partial_path(path);
    if let Err(e) = write_then_rename(&partial, path, &body).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e.into());
    }

    info!("✓ Snapshot saved to {} ({} bytes)", path.display(), body.len());
    Ok(SnapshotStatus::Downloaded)
}

/// Sibling of `path` in the same directory, so the rename stays on one filesystem
fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    path.with_file_name(format!(".{}.{}.part", name, Uuid::new_v4()))
}

async fn write_then_rename(partial: &Path, path: &Path, body: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(partial, body).await?;
    tokio::fs::rename(partial, path).await
}

/// Load the snapshot into memory
pub async fn load_snapshot(path: &Path) -> Result<serde_json::Value, AppError> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::SnapshotMissing { path: path.display().to_string() });
        }
        Err(e) => return Err(e.into()),
    };

    let snapshot: serde_json::Value = serde_json::from_slice(&raw)?;
    debug!(
        "Loaded snapshot with {} top-level keys",
        snapshot.as_object().map(|o| o.len()).unwrap_or(0)
    );
    Ok(snapshot)
}
