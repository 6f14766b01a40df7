pub mod blob;
pub mod engine;
pub mod lifecycle;
pub mod shared;
pub mod store;

pub use blob::{BlobStore, NoopBlobStore};
pub use engine::Engine;
pub use shared::SharedEngine;
pub use store::Store;
