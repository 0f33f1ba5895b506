//! User profiles under `users/{id}`.

use serde::Deserialize;

use crate::{Document, Result, decode};

/// Fields of a user profile the dispatcher reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDocument {
	pub fcm_token: Option<String>,
	pub email: Option<String>,
}

impl UserDocument {
	/// Field holding the device push token.
	pub const FCM_TOKEN: &'static str = "fcmToken";

	pub fn from_document(doc: &Document) -> Result<Self> {
		decode("user", doc)
	}

	/// The registered push token, ignoring blank values.
	pub fn push_token(&self) -> Option<&str> {
		self.fcm_token.as_deref().filter(|t| !t.trim().is_empty())
	}
}
