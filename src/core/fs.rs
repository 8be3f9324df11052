//! Async filesystem wrappers. Each helper performs one I/O step and reports
//! failure as `None` / `false`; the underlying error is only logged.

use crate::domain::model::FileStats;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::Path;
use tokio::fs;

fn swallow<T>(op: &str, path: &Path, result: std::io::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("{} failed for {}: {}", op, path.display(), e);
            None
        }
    }
}

async fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent).await,
        _ => Ok(()),
    }
}

pub async fn read_file(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    swallow("read_file", path, fs::read_to_string(path).await)
}

/// Writes `content`, creating missing parent directories first.
pub async fn write_file(path: impl AsRef<Path>, content: &str) -> bool {
    let path = path.as_ref();
    let result = async {
        ensure_parent(path).await?;
        fs::write(path, content).await
    }
    .await;
    swallow("write_file", path, result).is_some()
}

pub async fn append_file(path: impl AsRef<Path>, content: &str) -> bool {
    use tokio::io::AsyncWriteExt;

    let path = path.as_ref();
    let result = async {
        ensure_parent(path).await?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await
    }
    .await;
    swallow("append_file", path, result).is_some()
}

pub async fn read_json(path: impl AsRef<Path>) -> Option<Value> {
    let path = path.as_ref();
    let text = read_file(path).await?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("read_json could not parse {}: {}", path.display(), e);
            None
        }
    }
}

pub async fn write_json(path: impl AsRef<Path>, value: &Value, pretty: bool) -> bool {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(text) => write_file(path, &text).await,
        Err(e) => {
            tracing::debug!("write_json could not serialize value: {}", e);
            false
        }
    }
}

pub async fn file_exists(path: impl AsRef<Path>) -> bool {
    fs::try_exists(path.as_ref()).await.unwrap_or(false)
}

pub async fn ensure_dir(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    swallow("ensure_dir", path, fs::create_dir_all(path).await).is_some()
}

/// Entry names directly under `dir`, sorted.
pub async fn list_dir(dir: impl AsRef<Path>) -> Option<Vec<String>> {
    let dir = dir.as_ref();
    let result = async {
        let mut entries = fs::read_dir(dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok::<_, std::io::Error>(names)
    }
    .await;
    swallow("list_dir", dir, result)
}

pub async fn file_size(path: impl AsRef<Path>) -> Option<u64> {
    let path = path.as_ref();
    swallow("file_size", path, fs::metadata(path).await).map(|meta| meta.len())
}

pub async fn file_stats(path: impl AsRef<Path>) -> Option<FileStats> {
    let path = path.as_ref();
    let meta = swallow("file_stats", path, fs::metadata(path).await)?;
    Some(FileStats {
        size: meta.len(),
        is_file: meta.is_file(),
        is_dir: meta.is_dir(),
        modified: meta.modified().ok().map(DateTime::<Utc>::from),
        created: meta.created().ok().map(DateTime::<Utc>::from),
    })
}

pub async fn delete_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    swallow("delete_file", path, fs::remove_file(path).await).is_some()
}

/// Copies `from` to `to`, creating the destination's parent directories.
pub async fn copy_file(from: impl AsRef<Path>, to: impl AsRef<Path>) -> bool {
    let (from, to) = (from.as_ref(), to.as_ref());
    let result = async {
        ensure_parent(to).await?;
        fs::copy(from, to).await
    }
    .await;
    swallow("copy_file", from, result).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn write_then_read_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/note.txt");
        assert!(write_file(&path, "hello").await);
        assert_eq!(read_file(&path).await.as_deref(), Some("hello"));
        assert!(append_file(&path, " world").await);
        assert_eq!(read_file(&path).await.as_deref(), Some("hello world"));
        assert_eq!(file_size(&path).await, Some(11));
    }

    #[tokio::test]
    async fn missing_paths_are_sentinels() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.txt");
        assert_eq!(read_file(&missing).await, None);
        assert_eq!(read_json(&missing).await, None);
        assert_eq!(file_size(&missing).await, None);
        assert!(file_stats(&missing).await.is_none());
        assert!(!file_exists(&missing).await);
        assert!(!delete_file(&missing).await);
        assert!(list_dir(&missing).await.is_none());
    }

    #[tokio::test]
    async fn json_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let value = json!({"name": "utilkit", "tags": [1, 2]});
        assert!(write_json(&path, &value, true).await);
        assert_eq!(read_json(&path).await, Some(value));

        assert!(write_file(&path, "{not json").await);
        assert_eq!(read_json(&path).await, None);
    }

    #[tokio::test]
    async fn directory_helpers() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("a/b");
        assert!(ensure_dir(&sub).await);
        assert!(ensure_dir(&sub).await);
        assert!(write_file(sub.join("z.txt"), "z").await);
        assert!(write_file(sub.join("m.txt"), "m").await);
        assert_eq!(
            list_dir(&sub).await,
            Some(vec!["m.txt".to_string(), "z.txt".to_string()])
        );

        let stats = file_stats(&sub).await.unwrap();
        assert!(stats.is_dir);
        assert!(!stats.is_file);

        let copy = dir.path().join("copies/z.txt");
        assert!(copy_file(sub.join("z.txt"), &copy).await);
        assert!(file_exists(&copy).await);
        assert!(delete_file(&copy).await);
        assert!(!file_exists(&copy).await);
    }
}
