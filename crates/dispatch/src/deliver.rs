//! Send-and-classify logic shared by both handlers.

use storybell_model::{DocPath, QueuedNotification, UserDocument};
use storybell_push::{DeliveryError, PushGateway, PushMessage, SendReceipt};
use storybell_store::{DocumentStore, FieldUpdate};

/// Corrective action taken after a failed send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureHook {
	/// Delete the recipient's `fcmToken` when the token is permanently dead.
	ClearStaleToken { user: DocPath },
	/// Mark the queue record processed and store the failure message.
	RecordQueueError { record: DocPath },
}

/// Result of one [`deliver_push`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
	Sent(SendReceipt),
	Failed {
		error: DeliveryError,
		/// Whether the failure hook mutated a document.
		corrected: bool,
	},
}

/// Sends `message` and runs `hook` if the gateway rejects it.
///
/// Never fails: gateway and hook errors are logged and reflected in the
/// returned [`Delivery`].
pub async fn deliver_push(store: &dyn DocumentStore, gateway: &dyn PushGateway, message: &PushMessage, hook: &FailureHook) -> Delivery {
	match gateway.send(message).await {
		Ok(receipt) => {
			tracing::info!(message_id = %receipt.message_id, title = %message.notification.title, "push sent");
			Delivery::Sent(receipt)
		}
		Err(error) => {
			tracing::warn!(kind = %error.kind, error = %error.message, "push delivery failed");
			let corrected = hook.apply(store, &error).await;
			Delivery::Failed { error, corrected }
		}
	}
}

impl FailureHook {
	/// Runs the corrective action for `error`, returning whether a document changed.
	pub async fn apply(&self, store: &dyn DocumentStore, error: &DeliveryError) -> bool {
		match self {
			Self::ClearStaleToken { user } => {
				if !error.is_permanent_token_failure() {
					return false;
				}
				match store.update(user, vec![FieldUpdate::delete(UserDocument::FCM_TOKEN)]).await {
					Ok(()) => {
						tracing::info!(user = %user, "removed stale push token");
						true
					}
					Err(e) => {
						tracing::error!(user = %user, error = %e, "failed to remove stale push token");
						false
					}
				}
			}
			Self::RecordQueueError { record } => mark_processed(store, record, Some(&error.message)).await,
		}
	}
}

/// Marks a queue record handled, with an optional failure message.
pub(crate) async fn mark_processed(store: &dyn DocumentStore, record: &DocPath, error: Option<&str>) -> bool {
	let mut updates = vec![FieldUpdate::set(QueuedNotification::PROCESSED, true)];
	if let Some(error) = error {
		updates.push(FieldUpdate::set(QueuedNotification::ERROR, error));
	}
	updates.push(FieldUpdate::server_timestamp(QueuedNotification::PROCESSED_AT));

	match store.update(record, updates).await {
		Ok(()) => {
			tracing::info!(record = %record, failed = error.is_some(), "queued notification marked processed");
			true
		}
		Err(e) => {
			tracing::error!(record = %record, error = %e, "failed to mark queued notification processed");
			false
		}
	}
}
