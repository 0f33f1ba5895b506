use std::future::Future;

use crate::TaskClass;
use crate::budget::DrainReport;
use crate::join_set::WorkerJoinSet;

/// Bounded pool of concurrently running handler invocations.
///
/// Invocations share no state through the pool; it only caps how many run at
/// once and collects their exits so panics are logged instead of lost.
#[derive(Debug)]
pub struct InvocationPool {
	tasks: WorkerJoinSet<()>,
	max_in_flight: usize,
	report: DrainReport,
}

impl InvocationPool {
	/// Creates a pool allowing at most `max_in_flight` concurrent invocations.
	///
	/// A zero limit is treated as one.
	pub fn new(max_in_flight: usize) -> Self {
		Self {
			tasks: WorkerJoinSet::new(TaskClass::Invocation),
			max_in_flight: max_in_flight.max(1),
			report: DrainReport::default(),
		}
	}

	/// Number of invocations currently running.
	pub fn in_flight(&self) -> usize {
		self.tasks.len()
	}

	/// Submits one invocation, waiting for a free slot when the pool is full.
	pub async fn submit<F>(&mut self, fut: F)
	where
		F: Future<Output = ()> + Send + 'static,
	{
		while self.tasks.len() >= self.max_in_flight {
			match self.tasks.join_next().await {
				Some(result) => self.report.record(result),
				None => break,
			}
		}
		self.tasks.spawn(fut);
	}

	/// Waits for every submitted invocation and returns the cumulative report.
	pub async fn drain(mut self) -> DrainReport {
		while let Some(result) = self.tasks.join_next().await {
			self.report.record(result);
		}
		tracing::debug!(
			completed = self.report.completed,
			panicked = self.report.panicked,
			cancelled = self.report.cancelled,
			"invocation pool drained"
		);
		self.report
	}
}
