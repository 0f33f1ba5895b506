//! Story completion handler.

use storybell_model::{DocPath, Document, PartnershipDocument, StoryDocument, UserDocument};
use storybell_push::{DeliveryError, PushMessage, SendReceipt};

use crate::deliver::{Delivery, FailureHook, deliver_push};
use crate::{Classification, DispatchError, Dispatcher, Result, classify, resolve_partner};

/// What a story completion notification is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
	pub author_id: String,
	/// Display name as stored on the story; may be empty.
	pub author_name: String,
	/// `key: value` pairs of the story items joined by `", "`.
	pub prompt: String,
	pub partnership_id: String,
	pub story_id: String,
}

/// Result of one story update invocation.
#[derive(Debug)]
pub enum StoryOutcome {
	/// The update was not a completion; nothing was sent.
	NotCompleted(Classification),
	/// A completion was detected but the pipeline stopped before sending.
	Aborted(DispatchError),
	/// The partner was notified.
	Delivered(SendReceipt),
	/// The gateway rejected the notification.
	DeliveryFailed {
		error: DeliveryError,
		/// Whether the recipient's token was removed.
		token_cleared: bool,
	},
}

impl Dispatcher {
	/// Handles an update of `partnerships/{partnership_id}/stories/{story_id}`.
	pub async fn on_story_updated(&self, partnership_id: &str, story_id: &str, before: &Document, after: &Document) -> StoryOutcome {
		match self.story_pipeline(partnership_id, story_id, before, after).await {
			Ok(outcome) => outcome,
			Err(reason) => {
				tracing::warn!(partnership_id, story_id, reason = %reason, "story notification skipped");
				StoryOutcome::Aborted(reason)
			}
		}
	}

	async fn story_pipeline(&self, partnership_id: &str, story_id: &str, before: &Document, after: &Document) -> Result<StoryOutcome> {
		let before = StoryDocument::from_document(before)?;
		let after = StoryDocument::from_document(after)?;

		let classification = classify(before.trimmed_text(), after.trimmed_text());
		if classification != Classification::Completed {
			tracing::debug!(partnership_id, story_id, classification = classification.as_str(), "story update ignored");
			return Ok(StoryOutcome::NotCompleted(classification));
		}

		let author_id = after.author_id().ok_or(DispatchError::MissingAuthor)?;
		tracing::info!(partnership_id, story_id, author_id, "story completed");

		let recipient = self.resolve_recipient(partnership_id, author_id).await?;
		let completion = Completion {
			author_id: author_id.to_string(),
			author_name: after.author_name.clone().unwrap_or_default(),
			prompt: after.prompt_summary(),
			partnership_id: partnership_id.to_string(),
			story_id: story_id.to_string(),
		};
		self.notify_partner(&recipient, &completion).await
	}

	/// Looks up the partnership and returns the participant who is not the author.
	pub async fn resolve_recipient(&self, partnership_id: &str, author_id: &str) -> Result<String> {
		let path = DocPath::partnership(partnership_id)?;
		let doc = self
			.store()
			.get(&path)
			.await?
			.ok_or_else(|| DispatchError::PartnershipNotFound(partnership_id.to_string()))?;
		let partnership = PartnershipDocument::from_document(&doc)?;

		resolve_partner(&partnership, author_id)
			.map(str::to_string)
			.map_err(|reason| DispatchError::Partner {
				partnership_id: partnership_id.to_string(),
				author_id: author_id.to_string(),
				reason,
			})
	}

	/// Sends the completion notification to `recipient_id`.
	///
	/// A permanently invalid token is removed from the recipient's profile.
	pub async fn notify_partner(&self, recipient_id: &str, completion: &Completion) -> Result<StoryOutcome> {
		let user_path = DocPath::user(recipient_id)?;
		let doc = self
			.store()
			.get(&user_path)
			.await?
			.ok_or_else(|| DispatchError::RecipientNotFound(recipient_id.to_string()))?;
		let user = UserDocument::from_document(&doc)?;
		let token = user.push_token().ok_or_else(|| DispatchError::MissingToken(recipient_id.to_string()))?;

		let message = self.completion_message(token, completion);
		let hook = FailureHook::ClearStaleToken { user: user_path };
		tracing::info!(recipient_id, story_id = %completion.story_id, "sending story notification");

		Ok(match deliver_push(self.store(), self.gateway(), &message, &hook).await {
			Delivery::Sent(receipt) => StoryOutcome::Delivered(receipt),
			Delivery::Failed { error, corrected } => StoryOutcome::DeliveryFailed {
				error,
				token_cleared: corrected,
			},
		})
	}

	fn completion_message(&self, token: &str, completion: &Completion) -> PushMessage {
		let config = self.config();
		let display_name = match completion.author_name.trim() {
			"" => config.fallback_author.as_str(),
			name => name,
		};
		let message = PushMessage::new(token, config.title.clone(), config.story_body(display_name))
			.with_data("type", config.message_type.clone())
			.with_data("authorId", completion.author_id.clone())
			.with_data("authorName", completion.author_name.clone())
			.with_data("prompt", completion.prompt.clone())
			.with_data("partnershipId", completion.partnership_id.clone())
			.with_data("storyId", completion.story_id.clone());
		self.decorate(message)
	}
}
