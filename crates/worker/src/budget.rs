/// Summary of one [`InvocationPool::drain`](crate::InvocationPool::drain) pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
	/// Invocations that ran to completion.
	pub completed: u64,
	/// Invocations that panicked.
	pub panicked: u64,
	/// Invocations that were cancelled before completing.
	pub cancelled: u64,
}

impl DrainReport {
	pub(crate) fn record(&mut self, result: Result<(), tokio::task::JoinError>) {
		match result {
			Ok(()) => self.completed += 1,
			Err(err) if err.is_cancelled() => self.cancelled += 1,
			Err(err) => {
				self.panicked += 1;
				let message = crate::join_error_panic_message(err).unwrap_or_default();
				tracing::error!(panic = %message, "invocation panicked");
			}
		}
	}

	/// Total number of invocations observed by this report.
	pub fn total(&self) -> u64 {
		self.completed + self.panicked + self.cancelled
	}
}
