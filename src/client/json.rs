//! JSON convenience layer: non-2xx becomes [`Error::RequestFailed`], 2xx bodies are decoded.
//!
//! No schema validation happens here; the caller's type is the contract and a mismatched
//! payload surfaces as [`Error::Decode`].

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	client::{ApiClient, RequestOptions},
	obs::{self, RequestOutcome, RequestSpan, RequestStage},
	transport::{ApiResponse, HttpTransport},
};

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Issues a request and decodes a 2xx JSON body into `R`.
	pub async fn fetch_json<R>(&self, target: &str, options: RequestOptions) -> Result<R>
	where
		R: DeserializeOwned,
	{
		const STAGE: RequestStage = RequestStage::FetchJson;

		let span = RequestSpan::new(STAGE, options.method.as_str());

		obs::record_request_outcome(STAGE, RequestOutcome::Attempt);

		let result = span
			.instrument(async move {
				let response = ensure_success(self.request(target, options).await?)?;
				let status = response.status().as_u16();

				response.json::<R>().map_err(|source| Error::Decode { source, status })
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(STAGE, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(STAGE, RequestOutcome::Failure),
		}

		result
	}

	/// `GET`s `target` and decodes the JSON body.
	pub async fn get_json<R>(&self, target: &str) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.fetch_json(target, RequestOptions::new()).await
	}

	/// `POST`s `body` as JSON and decodes the JSON response.
	pub async fn post_json<B, R>(&self, target: &str, body: &B) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.fetch_json(target, RequestOptions::post().with_json(body)?).await
	}

	/// `PUT`s `body` as JSON and decodes the JSON response.
	pub async fn put_json<B, R>(&self, target: &str, body: &B) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.fetch_json(target, RequestOptions::put().with_json(body)?).await
	}

	/// `PATCH`es `body` as JSON and decodes the JSON response.
	pub async fn patch_json<B, R>(&self, target: &str, body: &B) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.fetch_json(target, RequestOptions::patch().with_json(body)?).await
	}

	/// `DELETE`s `target`, failing on non-2xx and ignoring any response body.
	pub async fn delete(&self, target: &str) -> Result<()> {
		ensure_success(self.request(target, RequestOptions::delete()).await?)?;

		Ok(())
	}
}

/// Passes 2xx responses through; anything else becomes [`Error::RequestFailed`] carrying the
/// body text, or a status-only message when the body is empty.
pub fn ensure_success(response: ApiResponse) -> Result<ApiResponse> {
	if response.is_success() {
		return Ok(response);
	}

	let status = response.status().as_u16();
	let text = response.text();
	let message = if text.is_empty() { format!("status {status}") } else { text };

	Err(Error::RequestFailed { status, message })
}
