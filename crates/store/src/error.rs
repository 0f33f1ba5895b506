//! Error types for document store access.

use storybell_model::{DocPath, ModelError};
use thiserror::Error;

/// Errors returned by [`DocumentStore`](crate::DocumentStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
	/// The addressed document does not exist.
	#[error("document not found: {0}")]
	NotFound(DocPath),

	/// A path or document could not be interpreted.
	#[error(transparent)]
	Model(#[from] ModelError),

	/// The backend rejected or failed the operation.
	#[error("store backend error: {0}")]
	Backend(String),
}

/// Result type for document store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
