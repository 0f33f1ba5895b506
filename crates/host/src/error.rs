//! Error types for the trigger host.

use std::path::PathBuf;

use storybell_push::FcmSetupError;
use storybell_store::StoreError;
use thiserror::Error;

/// Errors that stop the host before or while feeding events.
#[derive(Debug, Error)]
pub enum HostError {
	/// A file could not be read.
	#[error("I/O error reading {path}: {source}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		source: std::io::Error,
	},

	/// The event stream failed mid-read.
	#[error("I/O error reading events: {0}")]
	Events(#[source] std::io::Error),

	/// The config file is not valid TOML for [`HostConfig`](crate::config::HostConfig).
	#[error("invalid config {path}: {source}")]
	Config {
		path: PathBuf,
		source: toml::de::Error,
	},

	/// The seed file is not a JSON object.
	#[error("invalid seed {path}: {source}")]
	SeedJson {
		path: PathBuf,
		source: serde_json::Error,
	},

	/// The seed file contents could not be loaded into the store.
	#[error("invalid seed document: {0}")]
	Seed(#[from] StoreError),

	/// The FCM gateway could not be configured.
	#[error(transparent)]
	Fcm(#[from] FcmSetupError),

	/// The final store dump could not be rendered.
	#[error("failed to render store dump: {0}")]
	Dump(#[source] serde_json::Error),
}

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, HostError>;
