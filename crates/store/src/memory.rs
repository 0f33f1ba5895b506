//! In-process document store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use storybell_model::{DocPath, Document};

use crate::{DocumentStore, FieldUpdate, Result, StoreError};

/// Document store held entirely in memory.
///
/// Server timestamps are rendered as RFC 3339 strings from the store clock.
#[derive(Debug)]
pub struct MemoryStore {
	docs: Mutex<BTreeMap<DocPath, Document>>,
	clock: fn() -> DateTime<Utc>,
	updates: AtomicU64,
	read_only: AtomicBool,
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryStore {
	/// Creates an empty store using the system clock.
	pub fn new() -> Self {
		Self::with_clock(Utc::now)
	}

	/// Creates an empty store with a custom timestamp source.
	pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
		Self {
			docs: Mutex::new(BTreeMap::new()),
			clock,
			updates: AtomicU64::new(0),
			read_only: AtomicBool::new(false),
		}
	}

	/// Builds a store from a seed object mapping document paths to documents.
	pub fn from_seed(seed: Document) -> Result<Self> {
		let store = Self::new();
		for (raw, value) in seed {
			let path = DocPath::parse(&raw)?;
			let Value::Object(doc) = value else {
				return Err(StoreError::Backend(format!("seed entry {path} is not an object")));
			};
			store.insert(path, doc);
		}
		Ok(store)
	}

	/// Creates or replaces a document.
	pub fn insert(&self, path: DocPath, doc: Document) {
		self.docs.lock().insert(path, doc);
	}

	/// Synchronous read for inspection outside handler code.
	pub fn document(&self, path: &DocPath) -> Option<Document> {
		self.docs.lock().get(path).cloned()
	}

	/// Every document keyed by path text, in path order.
	pub fn snapshot(&self) -> Document {
		self.docs
			.lock()
			.iter()
			.map(|(path, doc)| (path.to_string(), Value::Object(doc.clone())))
			.collect()
	}

	/// Number of successful [`DocumentStore::update`] calls.
	pub fn update_count(&self) -> u64 {
		self.updates.load(Ordering::Acquire)
	}

	/// When set, every update fails with a backend error.
	pub fn set_read_only(&self, read_only: bool) {
		self.read_only.store(read_only, Ordering::Release);
	}

	fn timestamp(&self) -> Value {
		Value::String((self.clock)().to_rfc3339_opts(SecondsFormat::Millis, true))
	}
}

#[async_trait]
impl DocumentStore for MemoryStore {
	async fn get(&self, path: &DocPath) -> Result<Option<Document>> {
		Ok(self.document(path))
	}

	async fn update(&self, path: &DocPath, updates: Vec<FieldUpdate>) -> Result<()> {
		if self.read_only.load(Ordering::Acquire) {
			return Err(StoreError::Backend(format!("store is read-only, rejected update of {path}")));
		}

		let fields: Vec<String> = updates.iter().map(|u| u.field().to_owned()).collect();
		let now = self.timestamp();
		let mut docs = self.docs.lock();
		let doc = docs.get_mut(path).ok_or_else(|| StoreError::NotFound(path.clone()))?;
		for update in updates {
			match update {
				FieldUpdate::Set { field, value } => {
					doc.insert(field, value);
				}
				FieldUpdate::Delete { field } => {
					doc.shift_remove(&field);
				}
				FieldUpdate::ServerTimestamp { field } => {
					doc.insert(field, now.clone());
				}
			}
		}
		drop(docs);

		self.updates.fetch_add(1, Ordering::AcqRel);
		tracing::trace!(path = %path, fields = ?fields, "memory store update applied");
		Ok(())
	}
}
