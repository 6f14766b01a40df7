use trellis_core::TrellisResult;

/// Seam to the external byte-blob collaborator.
///
/// The core only records attachment metadata; the payload lives elsewhere
/// under a storage key. On cascade delete the key is forwarded here so the
/// collaborator can free the bytes.
#[cfg_attr(test, mockall::automock)]
pub trait BlobStore: Send + Sync {
    fn release(&self, storage_key: &str) -> TrellisResult<()>;
}

/// Default collaborator that owns nothing and releases nothing.
#[derive(Debug, Default)]
pub struct NoopBlobStore;

impl BlobStore for NoopBlobStore {
    fn release(&self, _storage_key: &str) -> TrellisResult<()> {
        Ok(())
    }
}
