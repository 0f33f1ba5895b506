//! Counterpart lookup within a partnership.

use storybell_model::PartnershipDocument;
use thiserror::Error;

/// Why a partner could not be resolved from a partnership document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartnerError {
	/// The author is neither `user1Id` nor `user2Id`.
	#[error("author is not a participant")]
	NotAParticipant,
	/// The author matched but the other slot is empty.
	#[error("partnership has no second participant")]
	PartnerMissing,
}

/// Returns the participant who is not `author_id`.
pub fn resolve_partner<'a>(partnership: &'a PartnershipDocument, author_id: &str) -> Result<&'a str, PartnerError> {
	let user1 = participant(&partnership.user1_id);
	let user2 = participant(&partnership.user2_id);

	let partner = if user1 == Some(author_id) {
		user2
	} else if user2 == Some(author_id) {
		user1
	} else {
		return Err(PartnerError::NotAParticipant);
	};
	partner.ok_or(PartnerError::PartnerMissing)
}

fn participant(id: &Option<String>) -> Option<&str> {
	id.as_deref().filter(|id| !id.is_empty())
}
