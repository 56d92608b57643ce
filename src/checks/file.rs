// src/checks/file.rs
use super::CheckError;
use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, SystemTime};

/// Succeeds iff the file exists and its mtime is within `max_staleness` of
/// now. A supervised process is expected to touch the file on every healthy
/// work cycle, so a stale mtime means the process stopped making progress.
pub(super) async fn verify(path: &Path, max_staleness: Duration) -> Result<(), CheckError> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CheckError::Stale("file missing".to_string()));
        }
        Err(e) => return Err(CheckError::Stale(format!("cannot stat file: {}", e))),
    };

    let modified = metadata
        .modified()
        .map_err(|e| CheckError::Stale(format!("cannot read mtime: {}", e)))?;

    // A file touched "in the future" (clock skew) counts as fresh.
    let age = SystemTime::now()
        .duration_since(modified)
        .unwrap_or_default();

    if age > max_staleness {
        Err(CheckError::Stale(format!(
            "stale by {}s",
            (age - max_staleness).as_secs()
        )))
    } else {
        Ok(())
    }
}
