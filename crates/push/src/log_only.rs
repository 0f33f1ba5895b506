use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::{DeliveryError, PushGateway, PushMessage, SendReceipt};

/// Gateway that accepts every message without contacting any service.
#[derive(Debug, Default)]
pub struct LogOnlyGateway {
	sent: AtomicU64,
}

impl LogOnlyGateway {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of messages accepted so far.
	pub fn sent(&self) -> u64 {
		self.sent.load(Ordering::Acquire)
	}
}

#[async_trait]
impl PushGateway for LogOnlyGateway {
	async fn send(&self, message: &PushMessage) -> Result<SendReceipt, DeliveryError> {
		let n = self.sent.fetch_add(1, Ordering::AcqRel) + 1;
		tracing::info!(
			token = %message.token_hint(),
			title = %message.notification.title,
			body = %message.notification.body,
			data_keys = message.data.len(),
			"push accepted without delivery"
		);
		Ok(SendReceipt {
			message_id: format!("log-only/{n}"),
		})
	}
}
