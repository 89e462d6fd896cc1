// JSON file helpers for the data file.
// Handles async reads, atomic writes, and change fingerprints.

use std::path::Path;
use std::time::SystemTime;

use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::Result;

/// Cheap identity of a file's contents, used to detect external changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub modified: SystemTime,
    pub len: u64,
}

/// Read and parse a JSON file. Returns `None` if the file does not exist.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let data = serde_json::from_str(&contents)?;
    Ok(Some(data))
}

/// Write data as pretty JSON, atomically via a temp file and rename.
pub async fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let json = serde_json::to_string_pretty(data)?;

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path).await?;
    file.write_all(json.as_bytes()).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(&temp_path, path).await?;

    Ok(())
}

/// Current fingerprint of a file, or `None` if it cannot be stat'ed.
pub async fn fingerprint(path: &Path) -> Option<Fingerprint> {
    let metadata = fs::metadata(path).await.ok()?;
    let modified = metadata.modified().ok()?;
    Some(Fingerprint {
        modified,
        len: metadata.len(),
    })
}
