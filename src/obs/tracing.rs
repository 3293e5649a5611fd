// self
use crate::{_prelude::*, identity::IdentityError, obs::RequestStage};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span builder used by request orchestration.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the provided stage + HTTP method.
	pub fn new(stage: RequestStage, method: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::debug_span!("erp_api_client.request", stage = stage.as_str(), method);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, method);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Reports an identity-source failure that was downgraded to "no token".
pub fn identity_failed(err: &IdentityError, force_refresh: bool) {
	#[cfg(feature = "tracing")]
	tracing::warn!(
		error = %err,
		force_refresh,
		"identity token lookup failed; continuing without a token"
	);

	#[cfg(not(feature = "tracing"))]
	let _ = (err, force_refresh);
}

/// Reports that a `401` is about to be replayed with a refreshed token.
pub fn retrying_unauthorized(url: &Url) {
	#[cfg(feature = "tracing")]
	tracing::debug!(%url, "received 401; forcing token refresh and retrying once");

	#[cfg(not(feature = "tracing"))]
	let _ = url;
}
