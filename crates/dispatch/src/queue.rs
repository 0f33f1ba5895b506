//! Queue drain handler.

use serde_json::Value;
use storybell_model::{DocPath, Document, QueuedNotification};
use storybell_push::{DeliveryError, DeliveryErrorKind, PushMessage, SendReceipt};

use crate::deliver::{Delivery, FailureHook, deliver_push, mark_processed};
use crate::{DispatchError, Dispatcher, Result};

/// Result of one queue record invocation.
#[derive(Debug)]
pub enum QueueOutcome {
	/// The record was already handled; nothing was sent.
	AlreadyProcessed,
	/// The record no longer exists.
	Missing,
	/// The record could not be turned into a message; it was marked processed
	/// with the error.
	Rejected(DeliveryError),
	/// The message was sent.
	Delivered {
		receipt: SendReceipt,
		/// Whether `processed` was written back.
		marked: bool,
	},
	/// The gateway rejected the message; the error was recorded.
	DeliveryFailed(DeliveryError),
	/// The record could not be read.
	Aborted(DispatchError),
}

impl Dispatcher {
	/// Handles creation of `notificationQueue/{queue_id}`.
	///
	/// The record is re-read from the store so redelivered create events for an
	/// already processed record do nothing.
	pub async fn on_notification_queued(&self, queue_id: &str) -> QueueOutcome {
		match self.drain_record(queue_id).await {
			Ok(outcome) => outcome,
			Err(reason) => {
				tracing::warn!(queue_id, reason = %reason, "queued notification not handled");
				QueueOutcome::Aborted(reason)
			}
		}
	}

	async fn drain_record(&self, queue_id: &str) -> Result<QueueOutcome> {
		let path = DocPath::queued_notification(queue_id)?;
		let Some(doc) = self.store().get(&path).await? else {
			tracing::warn!(queue_id, "queued notification vanished before handling");
			return Ok(QueueOutcome::Missing);
		};

		if QueuedNotification::is_processed(&doc) {
			let prior_error = doc.get(QueuedNotification::ERROR).and_then(Value::as_str);
			tracing::debug!(queue_id, prior_error, "queued notification already processed");
			return Ok(QueueOutcome::AlreadyProcessed);
		}

		let hook = FailureHook::RecordQueueError { record: path.clone() };
		let message = match self.queued_message(&doc) {
			Ok(message) => message,
			Err(error) => {
				tracing::warn!(queue_id, error = %error, "queued notification rejected");
				hook.apply(self.store(), &error).await;
				return Ok(QueueOutcome::Rejected(error));
			}
		};

		Ok(match deliver_push(self.store(), self.gateway(), &message, &hook).await {
			Delivery::Sent(receipt) => {
				let marked = mark_processed(self.store(), &path, None).await;
				QueueOutcome::Delivered { receipt, marked }
			}
			Delivery::Failed { error, .. } => QueueOutcome::DeliveryFailed(error),
		})
	}

	fn queued_message(&self, doc: &Document) -> std::result::Result<PushMessage, DeliveryError> {
		let record = QueuedNotification::from_document(doc)
			.map_err(|e| DeliveryError::new(DeliveryErrorKind::InvalidArgument, e.to_string()))?;
		let token = record
			.target_token()
			.ok_or_else(|| DeliveryError::new(DeliveryErrorKind::InvalidArgument, "queued notification has no targetToken"))?;

		let message = PushMessage::new(token, record.title.clone().unwrap_or_default(), record.body.clone().unwrap_or_default())
			.with_data_pairs(record.data_pairs());
		Ok(self.decorate(message))
	}
}
