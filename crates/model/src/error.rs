//! Error types for document paths and decoding.

use thiserror::Error;

/// Errors raised while addressing or decoding documents.
#[derive(Debug, Error)]
pub enum ModelError {
	/// A document path was malformed.
	#[error("invalid document path {path:?}: {reason}")]
	InvalidPath {
		/// The offending path text.
		path: String,
		/// Why the path was rejected.
		reason: &'static str,
	},

	/// A document did not match the expected shape.
	#[error("failed to decode {kind} document: {source}")]
	Decode {
		/// Name of the typed view being decoded.
		kind: &'static str,
		/// The underlying serde error.
		source: serde_json::Error,
	},
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
