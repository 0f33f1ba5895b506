//! Firebase Cloud Messaging HTTP v1 backend.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use storybell_worker::{TaskClass, spawn_blocking};
use url::Url;

use crate::{DeliveryError, DeliveryErrorKind, FcmSetupError, PushGateway, PushMessage, SendReceipt};

const DEFAULT_ENDPOINT: &str = "https://fcm.googleapis.com";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Connection settings for [`FcmGateway`].
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct FcmConfig {
	/// Base URL of the FCM API.
	pub endpoint: String,
	/// Firebase project the messages are sent on behalf of.
	pub project_id: String,
	/// OAuth2 bearer token with the `firebase.messaging` scope.
	pub access_token: String,
	/// Per-request timeout in milliseconds.
	pub timeout_ms: u64,
}

impl Default for FcmConfig {
	fn default() -> Self {
		Self {
			endpoint: DEFAULT_ENDPOINT.to_string(),
			project_id: String::new(),
			access_token: String::new(),
			timeout_ms: DEFAULT_TIMEOUT_MS,
		}
	}
}

impl fmt::Debug for FcmConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FcmConfig")
			.field("endpoint", &self.endpoint)
			.field("project_id", &self.project_id)
			.field("access_token", &if self.access_token.is_empty() { "<unset>" } else { "<redacted>" })
			.field("timeout_ms", &self.timeout_ms)
			.finish()
	}
}

impl FcmConfig {
	/// URL of the `messages:send` method for the configured project.
	pub fn send_url(&self) -> Result<Url, FcmSetupError> {
		if self.project_id.trim().is_empty() {
			return Err(FcmSetupError::MissingProjectId);
		}
		let invalid = |reason: String| FcmSetupError::InvalidEndpoint {
			endpoint: self.endpoint.clone(),
			reason,
		};
		let base = Url::parse(&self.endpoint).map_err(|e| invalid(e.to_string()))?;
		if !matches!(base.scheme(), "http" | "https") {
			return Err(invalid(format!("unsupported scheme {:?}", base.scheme())));
		}
		let raw = format!("{}/v1/projects/{}/messages:send", self.endpoint.trim_end_matches('/'), self.project_id.trim());
		Url::parse(&raw).map_err(|e| invalid(e.to_string()))
	}
}

/// Sends messages through the FCM HTTP v1 `messages:send` method.
///
/// The HTTP client is blocking; each send runs on the blocking pool.
#[derive(Clone)]
pub struct FcmGateway {
	agent: ureq::Agent,
	send_url: Url,
	authorization: String,
}

impl fmt::Debug for FcmGateway {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FcmGateway").field("send_url", &self.send_url.as_str()).finish_non_exhaustive()
	}
}

impl FcmGateway {
	pub fn new(config: &FcmConfig) -> Result<Self, FcmSetupError> {
		let send_url = config.send_url()?;
		if config.access_token.trim().is_empty() {
			return Err(FcmSetupError::MissingAccessToken);
		}
		let agent = ureq::AgentBuilder::new().timeout(Duration::from_millis(config.timeout_ms)).build();
		Ok(Self {
			agent,
			send_url,
			authorization: format!("Bearer {}", config.access_token.trim()),
		})
	}

	fn post(&self, body: Value) -> Result<SendReceipt, DeliveryError> {
		let response = self
			.agent
			.post(self.send_url.as_str())
			.set("Authorization", &self.authorization)
			.send_json(body);

		match response {
			Ok(response) => {
				let reply: SendReply = response
					.into_json()
					.map_err(|e| DeliveryError::new(DeliveryErrorKind::Unknown, format!("unreadable FCM reply: {e}")))?;
				Ok(SendReceipt { message_id: reply.name })
			}
			Err(ureq::Error::Status(status, response)) => {
				let body = response.into_string().unwrap_or_default();
				Err(classify_error(status, &body))
			}
			Err(ureq::Error::Transport(transport)) => Err(DeliveryError::new(DeliveryErrorKind::Transport, transport.to_string())),
		}
	}
}

#[async_trait]
impl PushGateway for FcmGateway {
	async fn send(&self, message: &PushMessage) -> Result<SendReceipt, DeliveryError> {
		let body = request_body(message);
		let gateway = self.clone();
		spawn_blocking(TaskClass::IoBlocking, move || gateway.post(body))
			.await
			.map_err(|e| DeliveryError::new(DeliveryErrorKind::Internal, format!("FCM send task failed: {e}")))?
	}
}

/// Wraps a message in the FCM v1 request envelope.
///
/// The platform payload is emitted as the APNs `aps` dictionary.
pub(crate) fn request_body(message: &PushMessage) -> Value {
	let platform = &message.platform_payload;
	let mut aps = json!({ "alert": platform.alert });
	if let Some(sound) = &platform.sound {
		aps["sound"] = json!(sound);
	}
	if let Some(badge) = platform.badge {
		aps["badge"] = json!(badge);
	}
	json!({
		"message": {
			"token": message.token,
			"notification": message.notification,
			"data": message.data,
			"apns": { "payload": { "aps": aps } },
		}
	})
}

#[derive(Deserialize)]
struct SendReply {
	#[serde(default)]
	name: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
	error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
	#[serde(default)]
	message: Option<String>,
	#[serde(default)]
	status: Option<String>,
	#[serde(default)]
	details: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
	#[serde(rename = "errorCode", default)]
	error_code: Option<String>,
}

/// Classifies an FCM error reply.
///
/// `details[].errorCode` wins over the canonical `status`, which wins over
/// the bare HTTP status.
pub(crate) fn classify_error(status: u16, body: &str) -> DeliveryError {
	let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
		let kind = DeliveryErrorKind::from_http_status(status);
		let message = if body.trim().is_empty() { format!("HTTP {status}") } else { format!("HTTP {status}: {}", body.trim()) };
		return DeliveryError::new(kind, message);
	};
	let error = envelope.error;

	let kind = error
		.details
		.iter()
		.filter_map(|d| d.error_code.as_deref())
		.find_map(DeliveryErrorKind::from_fcm_code)
		.or_else(|| error.status.as_deref().and_then(DeliveryErrorKind::from_fcm_code))
		.unwrap_or_else(|| DeliveryErrorKind::from_http_status(status));

	let message = error.message.unwrap_or_else(|| format!("HTTP {status}"));
	DeliveryError::new(kind, message)
}
