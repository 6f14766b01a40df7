use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::card::CardId;

pub type AttachmentId = Uuid;

/// Attachment metadata. The bytes themselves live with an external blob
/// collaborator, addressed by `storage_key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub card_id: CardId,
    pub original_filename: String,
    pub storage_key: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Attachment {
    pub fn new(
        card_id: CardId,
        original_filename: String,
        storage_key: String,
        size_bytes: u64,
        mime_type: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            card_id,
            original_filename,
            storage_key,
            size_bytes,
            mime_type,
            uploaded_at: Utc::now(),
        }
    }
}
