//! Push delivery gateway.
//!
//! [`PushGateway`] is the single seam through which handlers deliver a
//! [`PushMessage`]. A send either yields a [`SendReceipt`] or a typed
//! [`DeliveryError`] whose [`DeliveryErrorKind`] tells callers whether the
//! target token is permanently dead.
//!
//! Backends:
//! - [`FcmGateway`]: Firebase Cloud Messaging HTTP v1.
//! - [`LogOnlyGateway`]: accepts every message and only logs it.

mod error;
mod fcm;
mod log_only;
mod message;

use async_trait::async_trait;
pub use error::{DeliveryError, DeliveryErrorKind, FcmSetupError};
pub use fcm::{FcmConfig, FcmGateway};
pub use log_only::LogOnlyGateway;
pub use message::{Alert, Notification, PlatformPayload, PushMessage};

/// Identifier assigned by the gateway to an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
	pub message_id: String,
}

/// Delivery backend for push messages.
#[async_trait]
pub trait PushGateway: Send + Sync {
	/// Sends one message to the device identified by `message.token`.
	async fn send(&self, message: &PushMessage) -> Result<SendReceipt, DeliveryError>;
}
