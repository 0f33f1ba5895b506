use tokio::task::JoinHandle;

use crate::TaskClass;

/// Spawns blocking work with shared worker classification metadata.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_blocking<F, R>(class: TaskClass, f: F) -> JoinHandle<R>
where
	F: FnOnce() -> R + Send + 'static,
	R: Send + 'static,
{
	tracing::trace!(worker_class = class.as_str(), "worker.spawn_blocking");
	tokio::task::spawn_blocking(f)
}
