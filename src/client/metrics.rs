//! Per-client counters for requests, retries, token lookups, and deadline timers.

// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing what a client instance has done.
#[derive(Debug, Default)]
pub struct ClientMetrics {
	requests: AtomicU64,
	attempts: AtomicU64,
	retries: AtomicU64,
	token_fetches: AtomicU64,
	token_failures: AtomicU64,
	timeouts: AtomicU64,
	cancellations: AtomicU64,
	timers_armed: AtomicU64,
	timers_released: AtomicU64,
}
impl ClientMetrics {
	/// Returns the number of logical requests started.
	pub fn requests(&self) -> u64 {
		self.requests.load(Ordering::Relaxed)
	}

	/// Returns the number of physical HTTP attempts handed to the transport.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of `401`-triggered replays.
	pub fn retries(&self) -> u64 {
		self.retries.load(Ordering::Relaxed)
	}

	/// Returns the number of calls made to the identity source for a token.
	pub fn token_fetches(&self) -> u64 {
		self.token_fetches.load(Ordering::Relaxed)
	}

	/// Returns the number of identity-source failures that were downgraded to "no token".
	pub fn token_failures(&self) -> u64 {
		self.token_failures.load(Ordering::Relaxed)
	}

	/// Returns the number of requests that hit the internal deadline.
	pub fn timeouts(&self) -> u64 {
		self.timeouts.load(Ordering::Relaxed)
	}

	/// Returns the number of requests stopped by a caller cancellation token.
	pub fn cancellations(&self) -> u64 {
		self.cancellations.load(Ordering::Relaxed)
	}

	/// Returns the number of deadline timers armed.
	pub fn timers_armed(&self) -> u64 {
		self.timers_armed.load(Ordering::Relaxed)
	}

	/// Returns the number of deadline timers released.
	pub fn timers_released(&self) -> u64 {
		self.timers_released.load(Ordering::Relaxed)
	}

	pub(crate) fn record_request(&self) {
		self.requests.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_retry(&self) {
		self.retries.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_token_fetch(&self) {
		self.token_fetches.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_token_failure(&self) {
		self.token_failures.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_timeout(&self) {
		self.timeouts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_cancellation(&self) {
		self.cancellations.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_timer_armed(&self) {
		self.timers_armed.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_timer_released(&self) {
		self.timers_released.fetch_add(1, Ordering::Relaxed);
	}
}
