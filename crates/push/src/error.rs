//! Delivery failure classification.

use std::fmt;

use thiserror::Error;

/// Classification of a failed send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DeliveryErrorKind {
	/// The registration token is no longer valid for any app instance.
	Unregistered,
	/// The request or token was malformed.
	InvalidArgument,
	/// The token belongs to a different sender.
	SenderIdMismatch,
	/// Sending rate exceeded.
	QuotaExceeded,
	/// The gateway is temporarily unavailable.
	Unavailable,
	/// The gateway failed internally.
	Internal,
	/// Credentials for the platform push service were rejected.
	ThirdPartyAuth,
	/// The gateway rejected our own credentials.
	Unauthenticated,
	/// The request never produced an HTTP response.
	Transport,
	/// Anything not recognised above.
	Unknown,
}

impl DeliveryErrorKind {
	/// Maps an FCM `errorCode` or canonical `status` string.
	pub fn from_fcm_code(code: &str) -> Option<Self> {
		Some(match code {
			"UNREGISTERED" | "NOT_FOUND" => Self::Unregistered,
			"INVALID_ARGUMENT" => Self::InvalidArgument,
			"SENDER_ID_MISMATCH" => Self::SenderIdMismatch,
			"QUOTA_EXCEEDED" | "RESOURCE_EXHAUSTED" => Self::QuotaExceeded,
			"UNAVAILABLE" => Self::Unavailable,
			"INTERNAL" => Self::Internal,
			"THIRD_PARTY_AUTH_ERROR" => Self::ThirdPartyAuth,
			"UNAUTHENTICATED" | "PERMISSION_DENIED" => Self::Unauthenticated,
			_ => return None,
		})
	}

	/// Maps a bare HTTP status when the body carries no usable code.
	///
	/// A bare 404 says nothing about the token (wrong endpoint, proxy), so it
	/// never maps to [`Self::Unregistered`].
	pub fn from_http_status(status: u16) -> Self {
		match status {
			400 => Self::InvalidArgument,
			401 | 403 => Self::Unauthenticated,
			429 => Self::QuotaExceeded,
			503 => Self::Unavailable,
			500..=599 => Self::Internal,
			_ => Self::Unknown,
		}
	}

	/// Whether the target token should be discarded.
	pub fn is_permanent_token_failure(self) -> bool {
		matches!(self, Self::Unregistered)
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Unregistered => "unregistered",
			Self::InvalidArgument => "invalid_argument",
			Self::SenderIdMismatch => "sender_id_mismatch",
			Self::QuotaExceeded => "quota_exceeded",
			Self::Unavailable => "unavailable",
			Self::Internal => "internal",
			Self::ThirdPartyAuth => "third_party_auth",
			Self::Unauthenticated => "unauthenticated",
			Self::Transport => "transport",
			Self::Unknown => "unknown",
		}
	}
}

impl fmt::Display for DeliveryErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A failed send.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct DeliveryError {
	pub kind: DeliveryErrorKind,
	pub message: String,
}

impl DeliveryError {
	pub fn new(kind: DeliveryErrorKind, message: impl Into<String>) -> Self {
		Self {
			kind,
			message: message.into(),
		}
	}

	/// Convenience for the "registration token not registered" failure.
	pub fn unregistered() -> Self {
		Self::new(DeliveryErrorKind::Unregistered, "registration token is not registered")
	}

	pub fn is_permanent_token_failure(&self) -> bool {
		self.kind.is_permanent_token_failure()
	}
}

/// Errors constructing an [`FcmGateway`](crate::FcmGateway).
#[derive(Debug, Error)]
pub enum FcmSetupError {
	/// The endpoint is not an absolute http(s) URL.
	#[error("invalid FCM endpoint {endpoint:?}: {reason}")]
	InvalidEndpoint {
		endpoint: String,
		reason: String,
	},

	/// No Firebase project id was configured.
	#[error("FCM project id is not configured")]
	MissingProjectId,

	/// No access token was configured.
	#[error("FCM access token is not configured")]
	MissingAccessToken,
}
