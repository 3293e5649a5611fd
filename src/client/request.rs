//! Request orchestration: one logical call, at most two physical attempts.

// crates.io
use http::{HeaderMap, Method, StatusCode};
// self
use crate::{
	_prelude::*,
	auth::BearerToken,
	client::{ApiClient, RequestOptions, cancel::CancelBoundary},
	obs::{self, RequestOutcome, RequestSpan, RequestStage},
	transport::{ApiResponse, HttpTransport, RequestBody, RequestEnvelope},
};

/// Caller-supplied parts reused to build each attempt's envelope.
struct LogicalRequest {
	method: Method,
	url: Url,
	headers: HeaderMap,
	body: Option<RequestBody>,
}
impl LogicalRequest {
	fn envelope(&self, token: Option<&BearerToken>) -> Result<RequestEnvelope> {
		Ok(RequestEnvelope::new(
			self.method.clone(),
			self.url.clone(),
			&self.headers,
			token,
			self.body.clone(),
		)?)
	}
}

/// Retry state machine. `Retry` is terminal, which caps a call at two attempts.
enum Step {
	/// Attempt #1 with the (possibly shared) non-forced token.
	Initial(Option<BearerToken>),
	/// Attempt #1 returned `401` for a signed-in principal; force a refresh.
	Refresh(ApiResponse),
	/// Attempt #2 with the refreshed token; its response is final.
	Retry(BearerToken),
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Issues an authenticated request and returns the raw response.
	///
	/// Only transport failures (network, deadline, caller cancellation) and local
	/// configuration problems are errors; any HTTP status, `401` included, is returned as a
	/// normal [`ApiResponse`].
	pub async fn request(&self, target: &str, options: RequestOptions) -> Result<ApiResponse> {
		let RequestOptions { method, headers, body, signal } = options;
		let url = self.config.resolve(target)?;
		let span = RequestSpan::new(RequestStage::Attempt, method.as_str());
		let boundary = CancelBoundary::choose(signal, self.config.timeout);
		let logical = LogicalRequest { method, url, headers, body };

		self.metrics.record_request();

		span.instrument(boundary.run(&self.metrics, self.drive(&logical))).await
	}

	async fn drive(&self, logical: &LogicalRequest) -> Result<ApiResponse> {
		let mut step = Step::Initial(self.resolver.resolve(false).await);

		loop {
			step = match step {
				Step::Initial(token) => {
					let response = self.attempt(RequestStage::Attempt, logical, token.as_ref()).await?;

					if response.status() != StatusCode::UNAUTHORIZED
						|| self.identity.current_principal().is_none()
					{
						return Ok(response);
					}

					Step::Refresh(response)
				},
				Step::Refresh(unauthorized) => match self.resolver.resolve(true).await {
					Some(token) => {
						obs::retrying_unauthorized(&logical.url);

						Step::Retry(token)
					},
					None => return Ok(unauthorized),
				},
				Step::Retry(token) => {
					self.metrics.record_retry();

					return self.attempt(RequestStage::Retry, logical, Some(&token)).await;
				},
			};
		}
	}

	async fn attempt(
		&self,
		stage: RequestStage,
		logical: &LogicalRequest,
		token: Option<&BearerToken>,
	) -> Result<ApiResponse> {
		let envelope = logical.envelope(token)?;

		self.metrics.record_attempt();
		obs::record_request_outcome(stage, RequestOutcome::Attempt);

		match self.transport.send(envelope).await {
			Ok(response) => {
				obs::record_request_outcome(stage, RequestOutcome::Success);

				Ok(response)
			},
			Err(err) => {
				obs::record_request_outcome(stage, RequestOutcome::Failure);

				Err(err.into())
			},
		}
	}
}
