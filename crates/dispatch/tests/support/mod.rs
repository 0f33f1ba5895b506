//! Shared fakes for dispatch tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use storybell_dispatch::{DispatchConfig, Dispatcher};
use storybell_model::{DocPath, Document};
use storybell_push::{DeliveryError, PushGateway, PushMessage, SendReceipt};
use storybell_store::MemoryStore;

/// Gateway that records every message and replays scripted results.
///
/// Sends succeed unless a failure was queued with [`RecordingGateway::fail_next`].
#[derive(Default)]
pub struct RecordingGateway {
	sent: Mutex<Vec<PushMessage>>,
	script: Mutex<VecDeque<DeliveryError>>,
}

impl RecordingGateway {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn fail_next(&self, error: DeliveryError) {
		self.script.lock().push_back(error);
	}

	pub fn sent(&self) -> Vec<PushMessage> {
		self.sent.lock().clone()
	}
}

#[async_trait]
impl PushGateway for RecordingGateway {
	async fn send(&self, message: &PushMessage) -> Result<SendReceipt, DeliveryError> {
		let n = {
			let mut sent = self.sent.lock();
			sent.push(message.clone());
			sent.len()
		};
		match self.script.lock().pop_front() {
			Some(error) => Err(error),
			None => Ok(SendReceipt {
				message_id: format!("projects/test/messages/{n}"),
			}),
		}
	}
}

/// Server timestamp written by the harness store.
pub const FIXED_TIMESTAMP: &str = "2024-06-01T09:00:00.000Z";

fn fixed_clock() -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

pub struct Harness {
	pub store: Arc<MemoryStore>,
	pub gateway: Arc<RecordingGateway>,
	pub dispatcher: Dispatcher,
}

impl Harness {
	pub fn new() -> Self {
		let store = Arc::new(MemoryStore::with_clock(fixed_clock));
		let gateway = RecordingGateway::new();
		let dispatcher = Dispatcher::new(store.clone(), gateway.clone(), DispatchConfig::default());
		Self { store, gateway, dispatcher }
	}

	pub fn put(&self, path: &str, value: Value) {
		self.store.insert(DocPath::parse(path).unwrap(), doc(value));
	}

	pub fn get(&self, path: &str) -> Option<Document> {
		self.store.document(&DocPath::parse(path).unwrap())
	}

	/// Alice and Bob share partnership `p1`; Bob's device token is `tok123`.
	pub fn with_alice_and_bob() -> Self {
		let h = Self::new();
		h.put("partnerships/p1", serde_json::json!({"user1Id": "alice", "user2Id": "bob"}));
		h.put("users/alice", serde_json::json!({"email": "alice@example.com", "fcmToken": "tokAlice"}));
		h.put("users/bob", serde_json::json!({"email": "bob@example.com", "fcmToken": "tok123"}));
		h
	}
}

pub fn doc(value: Value) -> Document {
	match value {
		Value::Object(map) => map,
		other => panic!("expected a JSON object, got {other}"),
	}
}
