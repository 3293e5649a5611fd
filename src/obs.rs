//! Optional observability helpers for request orchestration.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `erp_api_client.request` with the `stage`
//!   (call site) and `method` fields, plus events for identity failures and `401` retries.
//! - Enable `metrics` to increment the `erp_api_client_request_total` counter for every
//!   attempt/success/failure, labeled by `stage` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Request stages observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestStage {
	/// Token resolution through the identity source.
	ResolveToken,
	/// First physical attempt.
	Attempt,
	/// Replay after a forced token refresh.
	Retry,
	/// JSON convenience wrapper.
	FetchJson,
}
impl RequestStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestStage::ResolveToken => "resolve_token",
			RequestStage::Attempt => "attempt",
			RequestStage::Retry => "retry",
			RequestStage::FetchJson => "fetch_json",
		}
	}
}
impl Display for RequestStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to a stage.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller (or downgraded, for token resolution).
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
