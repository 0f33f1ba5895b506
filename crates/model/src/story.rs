//! Story documents under `partnerships/{id}/stories/{id}`.

use serde::Deserialize;

use crate::{Document, Result, decode, value_text};

/// Typed view of a story document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoryDocument {
	/// Story body; empty until the story is completed.
	pub text: Option<String>,
	pub author_id: Option<String>,
	pub author_name: Option<String>,
	/// Prompt key to answer, in insertion order.
	pub items: Option<Document>,
}

impl StoryDocument {
	/// Decodes a story snapshot.
	pub fn from_document(doc: &Document) -> Result<Self> {
		decode("story", doc)
	}

	/// Story text with surrounding whitespace removed.
	pub fn trimmed_text(&self) -> &str {
		self.text.as_deref().unwrap_or_default().trim()
	}

	/// Author id, if present and non-empty.
	pub fn author_id(&self) -> Option<&str> {
		self.author_id.as_deref().filter(|id| !id.is_empty())
	}

	/// Renders the prompt answers as `key: value` pairs joined by `", "`.
	pub fn prompt_summary(&self) -> String {
		let Some(items) = &self.items else {
			return String::new();
		};
		items
			.iter()
			.map(|(key, value)| format!("{key}: {}", value_text(value).unwrap_or_default()))
			.collect::<Vec<_>>()
			.join(", ")
	}
}
