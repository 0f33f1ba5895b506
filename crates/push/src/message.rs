//! Push message payload.

use indexmap::IndexMap;
use serde::Serialize;

/// Visible notification content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
	pub title: String,
	pub body: String,
}

/// Alert shown by the Apple platform payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
	pub title: String,
	pub body: String,
}

/// Platform-specific delivery options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformPayload {
	pub alert: Alert,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sound: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub badge: Option<u32>,
}

/// One push message addressed to a single device token.
///
/// Data values are always strings; insertion order is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
	pub token: String,
	pub notification: Notification,
	pub data: IndexMap<String, String>,
	pub platform_payload: PlatformPayload,
}

impl PushMessage {
	/// Creates a message whose platform alert mirrors the notification text.
	pub fn new(token: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
		let title = title.into();
		let body = body.into();
		Self {
			token: token.into(),
			platform_payload: PlatformPayload {
				alert: Alert {
					title: title.clone(),
					body: body.clone(),
				},
				sound: None,
				badge: None,
			},
			notification: Notification { title, body },
			data: IndexMap::new(),
		}
	}

	/// Adds one data entry, replacing an existing value for the same key.
	#[must_use]
	pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.data.insert(key.into(), value.into());
		self
	}

	/// Adds every pair from `data` in iteration order.
	#[must_use]
	pub fn with_data_pairs<I, K, V>(mut self, data: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.data.extend(data.into_iter().map(|(k, v)| (k.into(), v.into())));
		self
	}

	#[must_use]
	pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
		self.platform_payload.sound = Some(sound.into());
		self
	}

	#[must_use]
	pub fn with_badge(mut self, badge: u32) -> Self {
		self.platform_payload.badge = Some(badge);
		self
	}

	/// Shortened token safe for logs: the first few characters and the length.
	pub fn token_hint(&self) -> String {
		const SHOWN: usize = 6;
		let len = self.token.chars().count();
		if len <= SHOWN {
			return format!("<{len} chars>");
		}
		let prefix: String = self.token.chars().take(SHOWN).collect();
		format!("{prefix}...<{len} chars>")
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn token_hint_never_contains_the_full_token() {
		let message = PushMessage::new("dGhpcy1pcy1hLWxvbmctZmNtLXRva2Vu", "t", "b");
		assert_eq!(message.token_hint(), "dGhpcy...<32 chars>");

		let short = PushMessage::new("tok123", "t", "b");
		assert_eq!(short.token_hint(), "<6 chars>");
	}
}
