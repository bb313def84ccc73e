//! File helpers shared by the file store, archive and activity log

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Atomic write via temp file and rename
pub(crate) async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    // same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;
    fs::rename(&temp_path, path).await?;

    Ok(())
}

/// Append one JSON value as a line
pub(crate) async fn append_jsonl<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut line = serde_json::to_string(value)?;
    line.push('\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;

    file.write_all(line.as_bytes()).await?;
    file.flush().await?;

    Ok(())
}

/// Read every parseable line, oldest first. Missing file reads as empty.
pub(crate) async fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !fs::try_exists(path).await? {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).await?;
    let mut skipped = 0usize;
    let values: Vec<T> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str(line) {
            Ok(value) => Some(value),
            Err(_) => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        tracing::warn!(path = %path.display(), skipped, "skipped unreadable JSONL lines");
    }

    Ok(values)
}

/// Non-blank lines of a JSONL file, verbatim. Missing file reads as empty.
pub(crate) async fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !fs::try_exists(path).await? {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).await?;
    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(String::from)
        .collect())
}

/// Replace a file with `lines`, one per line
pub(crate) async fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    atomic_write(path, content.as_bytes()).await
}
