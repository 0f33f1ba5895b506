//! Queue drain handler behavior against an in-memory store.

mod support;

use pretty_assertions::assert_eq;
use serde_json::json;
use storybell_dispatch::{Outcome, QueueOutcome, TriggerEvent};
use storybell_push::{DeliveryError, DeliveryErrorKind};
use support::{FIXED_TIMESTAMP, Harness, doc};

fn queued(h: &Harness, id: &str, value: serde_json::Value) -> TriggerEvent {
	h.put(&format!("notificationQueue/{id}"), value.clone());
	serde_json::from_value(json!({"kind": "create", "path": format!("notificationQueue/{id}"), "value": value})).unwrap()
}

#[tokio::test]
async fn record_is_sent_and_marked_processed() {
	let h = Harness::new();
	let event = queued(
		&h,
		"q1",
		json!({"targetToken": "tok9", "title": "Reminder", "body": "Write today's story", "data": {"type": "reminder", "day": 3}}),
	);

	let outcome = h.dispatcher.handle(&event).await;
	assert!(matches!(outcome, Outcome::Queue(QueueOutcome::Delivered { marked: true, .. })), "{outcome:?}");

	let sent = h.gateway.sent();
	assert_eq!(sent.len(), 1);
	assert_eq!(sent[0].token, "tok9");
	assert_eq!(sent[0].notification.title, "Reminder");
	assert_eq!(sent[0].notification.body, "Write today's story");
	assert_eq!(sent[0].data.get("type").map(String::as_str), Some("reminder"));
	assert_eq!(sent[0].data.get("day").map(String::as_str), Some("3"));

	assert_eq!(
		h.get("notificationQueue/q1").unwrap(),
		doc(json!({
			"targetToken": "tok9",
			"title": "Reminder",
			"body": "Write today's story",
			"data": {"type": "reminder", "day": 3},
			"processed": true,
			"processedAt": FIXED_TIMESTAMP
		}))
	);
}

#[tokio::test]
async fn redelivered_create_event_sends_once() {
	let h = Harness::new();
	let event = queued(&h, "q1", json!({"targetToken": "tok9", "title": "t", "body": "b"}));

	let first = h.dispatcher.handle(&event).await;
	let second = h.dispatcher.handle(&event).await;

	assert!(matches!(first, Outcome::Queue(QueueOutcome::Delivered { .. })));
	assert!(matches!(second, Outcome::Queue(QueueOutcome::AlreadyProcessed)));
	assert_eq!(h.gateway.sent().len(), 1);
	assert_eq!(h.store.update_count(), 1);
}

#[tokio::test]
async fn already_processed_record_is_skipped() {
	let h = Harness::new();
	h.put("notificationQueue/q1", json!({"targetToken": "tok9", "processed": true}));

	let outcome = h.dispatcher.on_notification_queued("q1").await;
	assert!(matches!(outcome, QueueOutcome::AlreadyProcessed));
	assert!(h.gateway.sent().is_empty());
	assert_eq!(h.store.update_count(), 0);
}

#[tokio::test]
async fn processed_record_with_prior_error_and_bad_fields_is_skipped() {
	let h = Harness::new();
	h.put(
		"notificationQueue/q1",
		json!({"targetToken": 42, "processed": true, "error": "registration token is not registered"}),
	);

	let outcome = h.dispatcher.on_notification_queued("q1").await;
	assert!(matches!(outcome, QueueOutcome::AlreadyProcessed));
	assert!(h.gateway.sent().is_empty());
	assert_eq!(h.store.update_count(), 0);
}

#[tokio::test]
async fn explicit_false_processed_is_handled() {
	let h = Harness::new();
	h.put("notificationQueue/q1", json!({"targetToken": "tok9", "processed": false}));

	let outcome = h.dispatcher.on_notification_queued("q1").await;
	assert!(matches!(outcome, QueueOutcome::Delivered { .. }));
}

#[tokio::test]
async fn delivery_failure_is_recorded_and_terminal() {
	let h = Harness::new();
	h.put("notificationQueue/q1", json!({"targetToken": "stale"}));
	h.gateway.fail_next(DeliveryError::unregistered());

	let outcome = h.dispatcher.on_notification_queued("q1").await;
	assert!(matches!(outcome, QueueOutcome::DeliveryFailed(ref e) if e.kind == DeliveryErrorKind::Unregistered));

	let record = h.get("notificationQueue/q1").unwrap();
	assert_eq!(record.get("processed"), Some(&json!(true)));
	assert_eq!(record.get("error"), Some(&json!("registration token is not registered")));
	assert_eq!(record.get("processedAt"), Some(&json!(FIXED_TIMESTAMP)));

	let again = h.dispatcher.on_notification_queued("q1").await;
	assert!(matches!(again, QueueOutcome::AlreadyProcessed));
	assert_eq!(h.gateway.sent().len(), 1);
}

#[tokio::test]
async fn record_without_token_is_rejected_without_sending() {
	let h = Harness::new();
	h.put("notificationQueue/q1", json!({"title": "t", "body": "b"}));

	let outcome = h.dispatcher.on_notification_queued("q1").await;
	assert!(matches!(outcome, QueueOutcome::Rejected(ref e) if e.kind == DeliveryErrorKind::InvalidArgument));
	assert!(h.gateway.sent().is_empty());

	let record = h.get("notificationQueue/q1").unwrap();
	assert_eq!(record.get("processed"), Some(&json!(true)));
	assert_eq!(record.get("error"), Some(&json!("queued notification has no targetToken")));
}

#[tokio::test]
async fn malformed_record_is_rejected_and_marked() {
	let h = Harness::new();
	h.put("notificationQueue/q1", json!({"targetToken": "tok9", "title": ["not", "a", "string"]}));

	let outcome = h.dispatcher.on_notification_queued("q1").await;
	assert!(matches!(outcome, QueueOutcome::Rejected(_)));
	assert_eq!(h.get("notificationQueue/q1").unwrap().get("processed"), Some(&json!(true)));
}

#[tokio::test]
async fn missing_record_is_reported() {
	let h = Harness::new();
	let outcome = h.dispatcher.on_notification_queued("gone").await;
	assert!(matches!(outcome, QueueOutcome::Missing));
	assert!(h.gateway.sent().is_empty());
}

#[tokio::test]
async fn failed_mark_after_send_is_reported_not_propagated() {
	let h = Harness::new();
	h.put("notificationQueue/q1", json!({"targetToken": "tok9"}));
	h.store.set_read_only(true);

	let outcome = h.dispatcher.on_notification_queued("q1").await;
	assert!(matches!(outcome, QueueOutcome::Delivered { marked: false, .. }));
	assert_eq!(h.get("notificationQueue/q1").unwrap().get("processed"), None);
}

#[tokio::test]
async fn data_absent_sends_empty_payload_with_platform_defaults() {
	let h = Harness::new();
	h.put("notificationQueue/q1", json!({"targetToken": "tok9", "title": "t", "body": "b", "data": null}));

	h.dispatcher.on_notification_queued("q1").await;
	let sent = h.gateway.sent();
	assert!(sent[0].data.is_empty());
	assert_eq!(sent[0].platform_payload.alert.title, "t");
	assert_eq!(sent[0].platform_payload.sound.as_deref(), Some("default"));
}
