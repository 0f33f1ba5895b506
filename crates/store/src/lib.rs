//! Document database capability.
//!
//! Handlers never talk to a database client directly. They receive an
//! `Arc<dyn DocumentStore>` and use the two operations the dispatcher needs:
//! read a document by path, and apply field updates to an existing document.
//! [`MemoryStore`] is the in-process backend used by the host and in tests.

mod error;
mod memory;
mod update;

use async_trait::async_trait;
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
use storybell_model::{DocPath, Document};
pub use update::FieldUpdate;

/// Read and field-update access to a document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
	/// Reads one document, returning `None` when it does not exist.
	async fn get(&self, path: &DocPath) -> Result<Option<Document>>;

	/// Applies `updates` to an existing document, in order.
	///
	/// Fails with [`StoreError::NotFound`] when the document does not exist.
	async fn update(&self, path: &DocPath, updates: Vec<FieldUpdate>) -> Result<()>;
}
