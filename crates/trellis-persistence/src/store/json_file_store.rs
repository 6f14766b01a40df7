use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trellis_core::{TrellisError, TrellisResult};
use trellis_domain::DataSnapshot;

use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{SavedMeta, SnapshotStore, FORMAT_VERSION};

/// JSON file implementation of [`SnapshotStore`].
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

/// On-disk wrapper around the snapshot.
#[derive(Debug, Serialize, Deserialize)]
struct JsonEnvelope {
    version: u32,
    saved_at: DateTime<Utc>,
    data: DataSnapshot,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn save(&self, snapshot: &DataSnapshot) -> TrellisResult<SavedMeta> {
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            data: snapshot.clone(),
        };
        let json_bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| TrellisError::Serialization(e.to_string()))?;

        AtomicWriter::write_atomic(&self.path, &json_bytes).await?;

        tracing::info!("Saved {} bytes to {}", json_bytes.len(), self.path.display());
        Ok(SavedMeta {
            format_version: envelope.version,
            saved_at: envelope.saved_at,
        })
    }

    async fn load(&self) -> TrellisResult<(DataSnapshot, SavedMeta)> {
        let file_bytes = AtomicWriter::read_all(&self.path).await?;

        let envelope: JsonEnvelope = serde_json::from_slice(&file_bytes)
            .map_err(|e| TrellisError::Serialization(e.to_string()))?;

        if envelope.version != FORMAT_VERSION {
            return Err(TrellisError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }

        tracing::info!(
            "Loaded {} bytes from {}",
            file_bytes.len(),
            self.path.display()
        );
        let meta = SavedMeta {
            format_version: envelope.version,
            saved_at: envelope.saved_at,
        };
        Ok((envelope.data, meta))
    }

    async fn exists(&self) -> bool {
        self.path.exists()
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use trellis_domain::Board;

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("trellis.json"));

        let snapshot = DataSnapshot {
            boards: vec![Board::new("Saved".to_string(), None)],
            ..Default::default()
        };

        let meta = store.save(&snapshot).await.unwrap();
        assert_eq!(meta.format_version, FORMAT_VERSION);
        assert!(store.exists().await);

        let (loaded, loaded_meta) = store.load().await.unwrap();
        assert_eq!(loaded_meta.format_version, FORMAT_VERSION);
        assert_eq!(loaded.boards.len(), 1);
        assert_eq!(loaded.boards[0].name, "Saved");
    }

    #[tokio::test]
    async fn missing_file_does_not_exist() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(!store.exists().await);
        assert!(store.load().await.is_err());
    }

    #[tokio::test]
    async fn rejects_unknown_format_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.json");
        let contents = r#"{"version": 99, "saved_at": "2024-01-01T00:00:00Z", "data": {}}"#;
        tokio::fs::write(&path, contents).await.unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.load().await,
            Err(TrellisError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn rejects_garbage_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        tokio::fs::write(&path, b"not json at all").await.unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.load().await,
            Err(TrellisError::Serialization(_))
        ));
    }
}
