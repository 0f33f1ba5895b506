//! Partnership documents under `partnerships/{id}`.

use serde::Deserialize;

use crate::{Document, Result, decode};

/// The two users collaborating on a set of stories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartnershipDocument {
	pub user1_id: Option<String>,
	pub user2_id: Option<String>,
}

impl PartnershipDocument {
	pub fn from_document(doc: &Document) -> Result<Self> {
		decode("partnership", doc)
	}
}
