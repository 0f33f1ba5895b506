//! Host configuration, loaded from TOML.
//!
//! ```toml
//! log_level = "info"
//! max_in_flight = 16
//!
//! [fcm]
//! project_id = "my-project"
//! access_token = "..."
//!
//! [messages]
//! title = "New Disney Story! ✨"
//! ```

use std::path::Path;

use serde::Deserialize;
use storybell_dispatch::DispatchConfig;
use storybell_push::FcmConfig;

use crate::error::{HostError, Result};

/// Logging verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Trace,
	Debug,
	#[default]
	Info,
	Warn,
	Error,
}

impl From<LogLevel> for tracing::Level {
	fn from(level: LogLevel) -> Self {
		match level {
			LogLevel::Trace => Self::TRACE,
			LogLevel::Debug => Self::DEBUG,
			LogLevel::Info => Self::INFO,
			LogLevel::Warn => Self::WARN,
			LogLevel::Error => Self::ERROR,
		}
	}
}

/// Everything the host needs to run the handlers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
	pub log_level: LogLevel,
	/// Upper bound on concurrently running invocations.
	pub max_in_flight: usize,
	pub fcm: FcmConfig,
	/// `[messages]`: story-completion text plus the sound and badge applied
	/// to every outgoing message, queued notifications included.
	pub messages: DispatchConfig,
}

impl Default for HostConfig {
	fn default() -> Self {
		Self {
			log_level: LogLevel::default(),
			max_in_flight: 16,
			fcm: FcmConfig::default(),
			messages: DispatchConfig::default(),
		}
	}
}

impl HostConfig {
	/// Reads and parses a config file.
	pub fn load(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path).map_err(|source| HostError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		toml::from_str(&text).map_err(|source| HostError::Config {
			path: path.to_path_buf(),
			source,
		})
	}
}
