//! Cancellation boundary for one logical request.
//!
//! The boundary is picked once, before any I/O: either the client's own deadline or the
//! caller's [`CancellationToken`], never both.

// crates.io
use tokio_util::sync::CancellationToken;
// self
use crate::{_prelude::*, client::ClientMetrics, error::TransportError};

/// Cancellation source chosen at request setup.
#[derive(Debug)]
pub(crate) enum CancelBoundary {
	/// Internal deadline; armed for the whole logical request.
	Deadline(Duration),
	/// Caller-owned token; the client enforces no deadline of its own.
	Caller(CancellationToken),
}
impl CancelBoundary {
	pub(crate) fn choose(signal: Option<CancellationToken>, timeout: Duration) -> Self {
		match signal {
			Some(token) => Self::Caller(token),
			None => Self::Deadline(timeout),
		}
	}

	/// Drives `fut` to completion unless the boundary fires first; dropping `fut` aborts any
	/// in-flight transport call.
	pub(crate) async fn run<F, T>(self, metrics: &ClientMetrics, fut: F) -> Result<T>
	where
		F: Future<Output = Result<T>>,
	{
		match self {
			Self::Deadline(after) => {
				let _timer = TimerGuard::arm(metrics);

				match tokio::time::timeout(after, fut).await {
					Ok(result) => result,
					Err(_) => {
						metrics.record_timeout();

						Err(TransportError::Timeout { after }.into())
					},
				}
			},
			Self::Caller(token) => tokio::select! {
				biased;
				_ = token.cancelled() => {
					metrics.record_cancellation();

					Err(TransportError::Cancelled.into())
				},
				result = fut => result,
			},
		}
	}
}

/// Accounts for the deadline timer; released on every exit path, including drop of the
/// enclosing future.
struct TimerGuard<'a> {
	metrics: &'a ClientMetrics,
}
impl<'a> TimerGuard<'a> {
	fn arm(metrics: &'a ClientMetrics) -> Self {
		metrics.record_timer_armed();

		Self { metrics }
	}
}
impl Drop for TimerGuard<'_> {
	fn drop(&mut self) {
		self.metrics.record_timer_released();
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test(start_paused = true)]
	async fn deadline_fires_and_releases_timer_once() {
		let metrics = ClientMetrics::default();
		let boundary = CancelBoundary::choose(None, Duration::from_millis(100));
		let result: Result<()> = boundary
			.run(&metrics, async {
				tokio::time::sleep(Duration::from_secs(60)).await;

				Ok(())
			})
			.await;

		assert!(result.expect_err("Deadline should fire first.").is_timeout());
		assert_eq!(metrics.timeouts(), 1);
		assert_eq!(metrics.timers_armed(), 1);
		assert_eq!(metrics.timers_released(), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn caller_signal_replaces_deadline() {
		let metrics = ClientMetrics::default();
		let token = CancellationToken::new();
		let boundary = CancelBoundary::choose(Some(token.clone()), Duration::from_millis(1));
		let result: Result<u8> = boundary
			.run(&metrics, async {
				tokio::time::sleep(Duration::from_secs(60)).await;

				Ok(7)
			})
			.await;

		assert_eq!(result.expect("No internal deadline applies with a caller signal."), 7);
		assert_eq!(metrics.timers_armed(), 0);

		token.cancel();

		let boundary = CancelBoundary::choose(Some(token), Duration::from_secs(1));
		let result: Result<u8> = boundary.run(&metrics, async { Ok(1) }).await;

		assert!(result.expect_err("Cancelled token must win.").is_cancelled());
		assert_eq!(metrics.cancellations(), 1);
	}
}
