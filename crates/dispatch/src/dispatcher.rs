use std::sync::Arc;

use storybell_push::{PushGateway, PushMessage};
use storybell_store::DocumentStore;
use tracing::Instrument;

use crate::{DispatchConfig, QueueOutcome, Route, StoryOutcome, TriggerEvent};

/// Handler context: the capabilities every invocation runs against.
///
/// Cheap to clone; each invocation gets its own copy and no state is shared
/// between invocations beyond the injected store and gateway.
#[derive(Clone)]
pub struct Dispatcher {
	store: Arc<dyn DocumentStore>,
	gateway: Arc<dyn PushGateway>,
	config: Arc<DispatchConfig>,
}

/// Result of routing and handling one trigger event.
#[derive(Debug)]
pub enum Outcome {
	Story(StoryOutcome),
	Queue(QueueOutcome),
	/// The event matched no trigger.
	Unrouted,
}

impl Dispatcher {
	pub fn new(store: Arc<dyn DocumentStore>, gateway: Arc<dyn PushGateway>, config: DispatchConfig) -> Self {
		Self {
			store,
			gateway,
			config: Arc::new(config),
		}
	}

	pub fn store(&self) -> &dyn DocumentStore {
		self.store.as_ref()
	}

	pub fn gateway(&self) -> &dyn PushGateway {
		self.gateway.as_ref()
	}

	pub fn config(&self) -> &DispatchConfig {
		&self.config
	}

	/// Routes one event to its handler.
	pub async fn handle(&self, event: &TriggerEvent) -> Outcome {
		let span = tracing::info_span!("trigger", kind = event.kind(), path = %event.path());
		async {
			match event.route() {
				Route::StoryUpdated { partnership_id, story_id } => {
					let (before, after) = event.snapshots();
					Outcome::Story(self.on_story_updated(&partnership_id, &story_id, before, after).await)
				}
				Route::NotificationQueued { queue_id } => Outcome::Queue(self.on_notification_queued(&queue_id).await),
				Route::Unrouted => {
					tracing::debug!("no trigger matches event");
					Outcome::Unrouted
				}
			}
		}
		.instrument(span)
		.await
	}

	/// Applies the configured platform sound and badge.
	pub(crate) fn decorate(&self, mut message: PushMessage) -> PushMessage {
		if let Some(sound) = &self.config.sound {
			message = message.with_sound(sound.clone());
		}
		if let Some(badge) = self.config.badge {
			message = message.with_badge(badge);
		}
		message
	}
}
