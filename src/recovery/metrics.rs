// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Events counted by [`RecoveryMetrics`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RecoveryEvent {
	Attempt,
	Renewed,
	RefreshFailed,
	Terminated,
}

/// In-process counters describing how often sessions needed recovery.
#[derive(Debug, Default)]
pub struct RecoveryMetrics([AtomicU64; 4]);
impl RecoveryMetrics {
	/// Refresh calls issued.
	pub fn attempts(&self) -> u64 {
		self.get(RecoveryEvent::Attempt)
	}

	/// Refresh calls that renewed the credential.
	pub fn successes(&self) -> u64 {
		self.get(RecoveryEvent::Renewed)
	}

	/// Refresh calls that failed for any reason.
	pub fn failures(&self) -> u64 {
		self.get(RecoveryEvent::RefreshFailed)
	}

	/// Sessions torn down by the recovery path, including second rejections after a renewal.
	pub fn terminations(&self) -> u64 {
		self.get(RecoveryEvent::Terminated)
	}

	pub(crate) fn record(&self, event: RecoveryEvent) {
		self.0[event as usize].fetch_add(1, Ordering::Relaxed);
	}

	fn get(&self, event: RecoveryEvent) -> u64 {
		self.0[event as usize].load(Ordering::Relaxed)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn events_are_counted_independently() {
		let metrics = RecoveryMetrics::default();

		metrics.record(RecoveryEvent::Attempt);
		metrics.record(RecoveryEvent::Attempt);
		metrics.record(RecoveryEvent::RefreshFailed);
		metrics.record(RecoveryEvent::Terminated);

		assert_eq!(metrics.attempts(), 2);
		assert_eq!(metrics.successes(), 0);
		assert_eq!(metrics.failures(), 1);
		assert_eq!(metrics.terminations(), 1);
	}
}
