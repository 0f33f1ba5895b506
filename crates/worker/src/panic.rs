use tokio::task::JoinError;

/// Extracts the panic payload message from a join error.
///
/// Returns `None` when the task was cancelled rather than panicking.
pub fn join_error_panic_message(err: JoinError) -> Option<String> {
	if !err.is_panic() {
		return None;
	}
	let payload = err.into_panic();
	if let Some(msg) = payload.downcast_ref::<&'static str>() {
		Some((*msg).to_string())
	} else if let Some(msg) = payload.downcast_ref::<String>() {
		Some(msg.clone())
	} else {
		Some("non-string panic payload".to_string())
	}
}

#[cfg(test)]
#[path = "panic_tests.rs"]
mod tests;
