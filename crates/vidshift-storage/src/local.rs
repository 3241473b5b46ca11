use crate::traits::{OutputKind, OutputStore, StorageError, StorageResult, StoredOutput};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

const OUTPUT_PREFIX: &str = "output_";
const OUTPUT_EXTENSION: &str = ".mp4";

/// Local filesystem output store
///
/// Every output is written twice: once under a sequential name
/// (`output_001.mp4`, `output_002.mp4`, ...) in `output_dir`, and once under a
/// random preview name in `preview_dir`, which is what the location reference
/// points at.
#[derive(Debug)]
pub struct LocalOutputStore {
    output_dir: PathBuf,
    preview_dir: PathBuf,
    preview_base_url: String,
    // Held while a sequential number is picked and its file written.
    sequence: Mutex<()>,
}

impl LocalOutputStore {
    /// Create a new LocalOutputStore, creating both directories if needed
    ///
    /// # Arguments
    /// * `output_dir` - Directory for sequentially numbered outputs (e.g., "output_videos")
    /// * `preview_dir` - Directory for preview copies (e.g., "static/videos")
    /// * `preview_base_url` - Prefix for preview locations (e.g., "/static/videos")
    pub async fn new(
        output_dir: impl Into<PathBuf>,
        preview_dir: impl Into<PathBuf>,
        preview_base_url: String,
    ) -> StorageResult<Self> {
        let output_dir = output_dir.into();
        let preview_dir = preview_dir.into();

        for dir in [&output_dir, &preview_dir] {
            fs::create_dir_all(dir).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create output directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        Ok(LocalOutputStore {
            output_dir,
            preview_dir,
            preview_base_url,
            sequence: Mutex::new(()),
        })
    }

    /// Next free sequential number: highest existing `output_NNN.mp4` plus one.
    ///
    /// Files whose number does not parse are ignored.
    pub async fn next_output_number(&self) -> StorageResult<u32> {
        let mut entries = fs::read_dir(&self.output_dir).await?;
        let mut highest: Option<u32> = None;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(number) = parse_output_number(name) {
                highest = Some(highest.map_or(number, |h| h.max(number)));
            }
        }

        match highest {
            None => Ok(1),
            Some(h) => h.checked_add(1).ok_or_else(|| {
                StorageError::WriteFailed(format!(
                    "No sequential output number left after {}{}{}",
                    OUTPUT_PREFIX, h, OUTPUT_EXTENSION
                ))
            }),
        }
    }

    /// Join a generated file name onto a directory, refusing anything that
    /// could escape it.
    fn name_to_path(dir: &Path, name: &str) -> StorageResult<PathBuf> {
        if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
            return Err(StorageError::InvalidKey(format!(
                "File name contains invalid characters: {}",
                name
            )));
        }
        Ok(dir.join(name))
    }

    fn generate_url(&self, name: &str) -> String {
        format!("{}/{}", self.preview_base_url.trim_end_matches('/'), name)
    }

    async fn write_file(path: &Path, data: &[u8]) -> StorageResult<()> {
        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

fn parse_output_number(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix(OUTPUT_PREFIX)?
        .strip_suffix(OUTPUT_EXTENSION)?
        .parse()
        .ok()
}

fn preview_name(kind: OutputKind) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}_{}{}", kind.preview_prefix(), &id[..8], OUTPUT_EXTENSION)
}

#[async_trait]
impl OutputStore for LocalOutputStore {
    async fn store(&self, data: &[u8], kind: OutputKind) -> StorageResult<StoredOutput> {
        let start = std::time::Instant::now();

        let (output_name, output_path) = {
            let _guard = self.sequence.lock().await;
            let number = self.next_output_number().await?;
            let output_name = format!("{}{:03}{}", OUTPUT_PREFIX, number, OUTPUT_EXTENSION);
            let output_path = Self::name_to_path(&self.output_dir, &output_name)?;
            Self::write_file(&output_path, data).await?;
            (output_name, output_path)
        };

        let preview = preview_name(kind);
        let preview_written = match Self::name_to_path(&self.preview_dir, &preview) {
            Ok(preview_path) => Self::write_file(&preview_path, data).await,
            Err(e) => Err(e),
        };
        if let Err(e) = preview_written {
            // Nothing will reference the sequential copy once this store fails.
            if let Err(cleanup) = fs::remove_file(&output_path).await {
                tracing::warn!(
                    path = %output_path.display(),
                    error = %cleanup,
                    "Failed to remove orphaned output copy"
                );
            }
            return Err(e);
        }

        let location = self.generate_url(&preview);

        tracing::info!(
            kind = %kind,
            output_name = %output_name,
            location = %location,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Stored transformed video"
        );

        Ok(StoredOutput {
            location,
            output_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn store_in(dir: &Path) -> LocalOutputStore {
        LocalOutputStore::new(
            dir.join("output_videos"),
            dir.join("static/videos"),
            "/static/videos/".to_string(),
        )
        .await
        .unwrap()
    }

    #[test]
    fn test_parse_output_number() {
        assert_eq!(parse_output_number("output_001.mp4"), Some(1));
        assert_eq!(parse_output_number("output_1234.mp4"), Some(1234));
        assert_eq!(parse_output_number("output_abc.mp4"), None);
        assert_eq!(parse_output_number("output_001.mov"), None);
        assert_eq!(parse_output_number("processed_001.mp4"), None);
    }

    #[test]
    fn test_preview_name_prefix() {
        let single = preview_name(OutputKind::Single);
        assert!(single.starts_with("processed_"));
        assert!(single.ends_with(".mp4"));
        assert_eq!(single.len(), "processed_".len() + 8 + 4);

        assert!(preview_name(OutputKind::BatchItem).starts_with("batch_"));
    }

    #[tokio::test]
    async fn test_store_writes_both_copies() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path()).await;

        let stored = store.store(b"video bytes", OutputKind::Single).await.unwrap();

        assert_eq!(stored.output_name, "output_001.mp4");
        assert!(stored.location.starts_with("/static/videos/processed_"));

        let output = fs::read(dir.path().join("output_videos/output_001.mp4"))
            .await
            .unwrap();
        assert_eq!(output, b"video bytes");

        let preview_name = stored.location.rsplit('/').next().unwrap();
        let preview = fs::read(dir.path().join("static/videos").join(preview_name))
            .await
            .unwrap();
        assert_eq!(preview, b"video bytes");
    }

    #[tokio::test]
    async fn test_sequence_continues_after_highest() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path()).await;
        let outputs = dir.path().join("output_videos");
        fs::write(outputs.join("output_003.mp4"), b"x").await.unwrap();
        fs::write(outputs.join("output_010.mp4"), b"x").await.unwrap();
        fs::write(outputs.join("output_final.mp4"), b"x").await.unwrap();
        fs::write(outputs.join("notes.txt"), b"x").await.unwrap();

        assert_eq!(store.next_output_number().await.unwrap(), 11);

        let first = store.store(b"a", OutputKind::BatchItem).await.unwrap();
        let second = store.store(b"b", OutputKind::BatchItem).await.unwrap();
        assert_eq!(first.output_name, "output_011.mp4");
        assert_eq!(second.output_name, "output_012.mp4");
    }

    async fn dir_names(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(dir).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names
    }

    #[tokio::test]
    async fn test_sequence_exhausted_is_an_error() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path()).await;
        fs::write(
            dir.path().join("output_videos/output_4294967295.mp4"),
            b"x",
        )
        .await
        .unwrap();

        let result = store.store(b"v", OutputKind::Single).await;

        assert!(matches!(result, Err(StorageError::WriteFailed(_))));
        assert!(dir_names(&dir.path().join("static/videos")).await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_output_write_leaves_no_preview() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path()).await;
        fs::remove_dir_all(dir.path().join("output_videos"))
            .await
            .unwrap();

        let result = store.store(b"v", OutputKind::BatchItem).await;

        assert!(result.is_err());
        assert!(dir_names(&dir.path().join("static/videos")).await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_preview_write_removes_output_copy() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path()).await;
        fs::remove_dir_all(dir.path().join("static/videos"))
            .await
            .unwrap();

        let result = store.store(b"v", OutputKind::Single).await;

        assert!(matches!(result, Err(StorageError::WriteFailed(_))));
        assert!(dir_names(&dir.path().join("output_videos")).await.is_empty());
    }

    #[test]
    fn test_name_traversal_rejected() {
        let base = Path::new("/tmp/outputs");
        assert!(matches!(
            LocalOutputStore::name_to_path(base, "../etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            LocalOutputStore::name_to_path(base, "a/b.mp4"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(LocalOutputStore::name_to_path(base, "output_001.mp4").is_ok());
    }
}
