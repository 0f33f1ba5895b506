//! Document events and the trigger paths they are routed by.

use serde::{Deserialize, Serialize};
use storybell_model::path::{NOTIFICATION_QUEUE, PARTNERSHIPS, STORIES};
use storybell_model::{DocPath, Document};

/// A document mutation delivered by the change feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerEvent {
	/// An existing document was written.
	Update {
		path: DocPath,
		#[serde(default)]
		before: Document,
		#[serde(default)]
		after: Document,
	},
	/// A document was created.
	Create {
		path: DocPath,
		#[serde(default)]
		value: Document,
	},
}

/// Handler selected for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
	/// Update on `partnerships/{partnership_id}/stories/{story_id}`.
	StoryUpdated { partnership_id: String, story_id: String },
	/// Create on `notificationQueue/{queue_id}`.
	NotificationQueued { queue_id: String },
	Unrouted,
}

impl TriggerEvent {
	pub fn path(&self) -> &DocPath {
		match self {
			Self::Update { path, .. } | Self::Create { path, .. } => path,
		}
	}

	pub const fn kind(&self) -> &'static str {
		match self {
			Self::Update { .. } => "update",
			Self::Create { .. } => "create",
		}
	}

	/// Before and after snapshots; a create has an empty "before".
	pub fn snapshots(&self) -> (&Document, &Document) {
		static EMPTY: std::sync::LazyLock<Document> = std::sync::LazyLock::new(Document::new);
		match self {
			Self::Update { before, after, .. } => (before, after),
			Self::Create { value, .. } => (&EMPTY, value),
		}
	}

	/// Matches the event against the trigger templates.
	pub fn route(&self) -> Route {
		let segments: Vec<&str> = self.path().segments().collect();
		match (self, segments.as_slice()) {
			(Self::Update { .. }, [PARTNERSHIPS, partnership_id, STORIES, story_id]) => Route::StoryUpdated {
				partnership_id: partnership_id.to_string(),
				story_id: story_id.to_string(),
			},
			(Self::Create { .. }, [NOTIFICATION_QUEUE, queue_id]) => Route::NotificationQueued {
				queue_id: queue_id.to_string(),
			},
			_ => Route::Unrouted,
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn event(value: serde_json::Value) -> TriggerEvent {
		serde_json::from_value(value).unwrap()
	}

	#[test]
	fn story_update_routes_to_story_handler() {
		let ev = event(json!({
			"kind": "update",
			"path": "partnerships/p1/stories/2024-06-01",
			"before": {"text": ""},
			"after": {"text": "done"}
		}));
		assert_eq!(
			ev.route(),
			Route::StoryUpdated {
				partnership_id: "p1".into(),
				story_id: "2024-06-01".into()
			}
		);
		assert_eq!(ev.snapshots().1.get("text"), Some(&json!("done")));
	}

	#[test]
	fn queue_create_routes_to_drain_handler() {
		let ev = event(json!({"kind": "create", "path": "notificationQueue/q1", "value": {"targetToken": "t"}}));
		assert_eq!(ev.route(), Route::NotificationQueued { queue_id: "q1".into() });
		assert!(ev.snapshots().0.is_empty());
	}

	#[test]
	fn mismatched_kind_or_path_is_unrouted() {
		assert_eq!(event(json!({"kind": "create", "path": "partnerships/p1/stories/s1"})).route(), Route::Unrouted);
		assert_eq!(event(json!({"kind": "update", "path": "notificationQueue/q1"})).route(), Route::Unrouted);
		assert_eq!(event(json!({"kind": "update", "path": "users/bob"})).route(), Route::Unrouted);
		assert_eq!(event(json!({"kind": "update", "path": "partnerships/p1/comments/c1"})).route(), Route::Unrouted);
	}

	#[test]
	fn malformed_paths_are_rejected_at_decode() {
		assert!(serde_json::from_value::<TriggerEvent>(json!({"kind": "create", "path": "notificationQueue"})).is_err());
		assert!(serde_json::from_value::<TriggerEvent>(json!({"kind": "delete", "path": "users/bob"})).is_err());
	}
}
