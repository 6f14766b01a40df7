use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use trellis_core::TrellisResult;
use trellis_domain::DataSnapshot;

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

/// Metadata recorded alongside a saved snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedMeta {
    pub format_version: u32,
    pub saved_at: DateTime<Utc>,
}

impl SavedMeta {
    pub fn now() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            saved_at: Utc::now(),
        }
    }
}

/// Abstract snapshot storage. Implementations decide the backing medium;
/// the contract is that `save` is atomic: a crash mid-save leaves either
/// the previous snapshot or the new one, never a torn file.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn save(&self, snapshot: &DataSnapshot) -> TrellisResult<SavedMeta>;

    async fn load(&self) -> TrellisResult<(DataSnapshot, SavedMeta)>;

    async fn exists(&self) -> bool;

    fn path(&self) -> &Path;
}
