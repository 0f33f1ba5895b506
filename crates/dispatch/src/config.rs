use serde::Deserialize;

/// Message presentation settings shared by both handlers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
	/// Title of the story-completion notification.
	pub title: String,
	/// Body of the story-completion notification; `{author}` is replaced with
	/// the author's display name.
	pub body_template: String,
	/// Display name used when the story has no `authorName`.
	pub fallback_author: String,
	/// Value of the `type` data entry on story-completion notifications.
	pub message_type: String,
	/// Platform alert sound.
	pub sound: Option<String>,
	/// Platform badge count.
	pub badge: Option<u32>,
}

impl Default for DispatchConfig {
	fn default() -> Self {
		Self {
			title: "New Disney Story! ✨".to_string(),
			body_template: "{author} just finished a story. Tap to read it!".to_string(),
			fallback_author: "Your partner".to_string(),
			message_type: "story_completed".to_string(),
			sound: Some("default".to_string()),
			badge: Some(1),
		}
	}
}

impl DispatchConfig {
	/// Renders the story-completion body for `author`.
	pub fn story_body(&self, author: &str) -> String {
		self.body_template.replace("{author}", author)
	}
}
