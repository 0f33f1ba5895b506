//! Reasons a handler stops before or instead of sending.

use storybell_model::ModelError;
use storybell_store::StoreError;
use thiserror::Error;

use crate::PartnerError;

/// Early exits of a handler invocation.
///
/// None of these reach a caller; handlers log them and fold them into their
/// outcome.
#[derive(Debug, Error)]
pub enum DispatchError {
	/// The partnership document does not exist.
	#[error("partnership {0} not found")]
	PartnershipNotFound(String),

	/// The partnership exists but the author could not be paired.
	#[error("cannot resolve partner of {author_id} in partnership {partnership_id}: {reason}")]
	Partner {
		partnership_id: String,
		author_id: String,
		reason: PartnerError,
	},

	/// The completed story carries no author id.
	#[error("completed story has no authorId")]
	MissingAuthor,

	/// The recipient's profile does not exist.
	#[error("user {0} not found")]
	RecipientNotFound(String),

	/// The recipient has no registered push token.
	#[error("user {0} has no push token")]
	MissingToken(String),

	/// A document could not be addressed or decoded.
	#[error(transparent)]
	Model(#[from] ModelError),

	/// The document store failed.
	#[error(transparent)]
	Store(#[from] StoreError),
}

/// Result type for handler internals.
pub type Result<T> = std::result::Result<T, DispatchError>;
