//! Slash-separated document addresses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ModelError, Result};

/// Top-level collection holding partnership documents.
pub const PARTNERSHIPS: &str = "partnerships";
/// Sub-collection of a partnership holding its story documents.
pub const STORIES: &str = "stories";
/// Top-level collection holding user profiles.
pub const USERS: &str = "users";
/// Top-level collection holding queued push notifications.
pub const NOTIFICATION_QUEUE: &str = "notificationQueue";

/// Address of a single document: alternating collection and document ids.
///
/// A valid path has an even, non-zero number of non-empty segments, e.g.
/// `partnerships/p1/stories/2024-06-01`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocPath(String);

impl DocPath {
	/// Parses a path, ignoring one leading and one trailing slash.
	pub fn parse(raw: &str) -> Result<Self> {
		let trimmed = raw.strip_prefix('/').unwrap_or(raw);
		let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
		let segments: Vec<&str> = trimmed.split('/').collect();
		Self::from_segments(raw, &segments)
	}

	/// Builds a path from individual segments.
	pub fn from_parts(segments: &[&str]) -> Result<Self> {
		Self::from_segments(&segments.join("/"), segments)
	}

	fn from_segments(raw: &str, segments: &[&str]) -> Result<Self> {
		let invalid = |reason| ModelError::InvalidPath { path: raw.to_string(), reason };
		if segments.iter().any(|s| s.is_empty()) {
			return Err(invalid("empty segment"));
		}
		if segments.iter().any(|s| s.contains('/')) {
			return Err(invalid("segment contains '/'"));
		}
		if segments.len() % 2 != 0 {
			return Err(invalid("path names a collection, not a document"));
		}
		Ok(Self(segments.join("/")))
	}

	/// `partnerships/{partnership_id}`
	pub fn partnership(partnership_id: &str) -> Result<Self> {
		Self::from_parts(&[PARTNERSHIPS, partnership_id])
	}

	/// `partnerships/{partnership_id}/stories/{story_id}`
	pub fn story(partnership_id: &str, story_id: &str) -> Result<Self> {
		Self::from_parts(&[PARTNERSHIPS, partnership_id, STORIES, story_id])
	}

	/// `users/{user_id}`
	pub fn user(user_id: &str) -> Result<Self> {
		Self::from_parts(&[USERS, user_id])
	}

	/// `notificationQueue/{queue_id}`
	pub fn queued_notification(queue_id: &str) -> Result<Self> {
		Self::from_parts(&[NOTIFICATION_QUEUE, queue_id])
	}

	/// Path segments in order.
	pub fn segments(&self) -> impl Iterator<Item = &str> {
		self.0.split('/')
	}

	/// Document id (last segment).
	pub fn id(&self) -> &str {
		self.0.rsplit('/').next().unwrap_or_default()
	}

	/// The path as text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for DocPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl TryFrom<String> for DocPath {
	type Error = ModelError;

	fn try_from(value: String) -> Result<Self> {
		Self::parse(&value)
	}
}

impl From<DocPath> for String {
	fn from(path: DocPath) -> Self {
		path.0
	}
}
