//! Queued notification records under `notificationQueue/{id}`.

use serde::Deserialize;
use serde_json::Value;

use crate::{Document, Result, decode, value_text};

/// A persisted request to send one push message.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueuedNotification {
	pub target_token: Option<String>,
	pub title: Option<String>,
	pub body: Option<String>,
	pub data: Option<Document>,
}

impl QueuedNotification {
	/// Set once the record has been handled, successfully or not.
	pub const PROCESSED: &'static str = "processed";
	/// Failure message recorded alongside `processed`.
	pub const ERROR: &'static str = "error";
	/// Server timestamp written when the record is handled.
	pub const PROCESSED_AT: &'static str = "processedAt";

	pub fn from_document(doc: &Document) -> Result<Self> {
		decode("queued notification", doc)
	}

	/// Whether a raw record has already been handled.
	///
	/// Reads the field directly so a handled record is recognised even when
	/// its other fields no longer decode. Only a literal `true` counts.
	pub fn is_processed(doc: &Document) -> bool {
		doc.get(Self::PROCESSED).and_then(Value::as_bool) == Some(true)
	}

	/// Target token, ignoring blank values.
	pub fn target_token(&self) -> Option<&str> {
		self.target_token.as_deref().filter(|t| !t.trim().is_empty())
	}

	/// Data payload as string pairs in record order; `null` values are dropped.
	pub fn data_pairs(&self) -> Vec<(String, String)> {
		let Some(data) = &self.data else {
			return Vec::new();
		};
		data.iter().filter_map(|(key, value)| value_text(value).map(|text| (key.clone(), text))).collect()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	#[test]
	fn absent_processed_means_unprocessed() {
		let doc = json!({"targetToken": "t"}).as_object().unwrap().clone();
		assert!(!QueuedNotification::is_processed(&doc));
		let record = QueuedNotification::from_document(&doc).unwrap();
		assert_eq!(record.target_token(), Some("t"));
		assert!(record.data_pairs().is_empty());
	}

	#[test]
	fn data_pairs_stringify_values_in_order() {
		let record = QueuedNotification::from_document(
			json!({
				"processed": false,
				"data": {"type": "reminder", "count": 2, "urgent": true, "skip": null}
			})
			.as_object()
			.unwrap(),
		)
		.unwrap();
		assert_eq!(
			record.data_pairs(),
			vec![
				("type".to_string(), "reminder".to_string()),
				("count".to_string(), "2".to_string()),
				("urgent".to_string(), "true".to_string()),
			]
		);
	}

	#[test]
	fn only_literal_true_marks_processed() {
		let processed = |value: serde_json::Value| QueuedNotification::is_processed(json!({"processed": value}).as_object().unwrap());
		assert!(processed(json!(true)));
		assert!(!processed(json!(false)));
		assert!(!processed(json!("true")));
		assert!(!processed(json!(null)));
	}

	#[test]
	fn processed_record_with_malformed_fields_is_still_processed() {
		let doc = json!({"processed": true, "targetToken": 42}).as_object().unwrap().clone();
		assert!(QueuedNotification::is_processed(&doc));
		assert!(QueuedNotification::from_document(&doc).is_err());
	}

	#[test]
	fn blank_token_is_treated_as_missing() {
		let record = QueuedNotification::from_document(json!({"targetToken": "  "}).as_object().unwrap()).unwrap();
		assert_eq!(record.target_token(), None);
	}
}
