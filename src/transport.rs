//! Transport primitives: the fetch seam, request envelopes, and buffered responses.
//!
//! [`HttpTransport`] is the client's only dependency on an HTTP stack. The default
//! [`ReqwestTransport`] sits behind the `reqwest` feature; tests and embedders can plug in any
//! implementation that turns a [`RequestEnvelope`] into an [`ApiResponse`].

pub mod body;
pub mod envelope;

pub use body::*;
pub use envelope::*;

// crates.io
use http::{HeaderMap, StatusCode};
#[cfg(feature = "reqwest")] use http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing one request attempt.
///
/// Implementations must not retry, follow authentication challenges, or enforce deadlines of
/// their own; the client owns all of that. Dropping the returned future must abort the
/// in-flight request.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes one attempt and buffers the response.
	fn send(&self, envelope: RequestEnvelope) -> TransportFuture<'_>;
}

/// Raw backend response, fully buffered.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	status: StatusCode,
	headers: HeaderMap,
	body: Vec<u8>,
}
impl ApiResponse {
	/// Creates a response from its parts.
	pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers, body: body.into() }
	}

	/// HTTP status code.
	pub fn status(&self) -> StatusCode {
		self.status
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Response headers.
	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	/// Raw body bytes.
	pub fn body(&self) -> &[u8] {
		&self.body
	}

	/// Body decoded as UTF-8, replacing invalid sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Decodes the body as JSON, reporting the failing path on error.
	pub fn json<T>(&self) -> Result<T, serde_path_to_error::Error<serde_json::Error>>
	where
		T: DeserializeOwned,
	{
		let mut de = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut de)
	}

	/// Consumes the response, returning the body bytes.
	pub fn into_body(self) -> Vec<u8> {
		self.body
	}
}

/// Default transport backed by [`ReqwestClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn send(&self, envelope: RequestEnvelope) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let RequestEnvelope { method, url, mut headers, body } = envelope;
			let form = match &body {
				Some(RequestBody::Multipart(form)) => {
					// reqwest appends its own boundary-carrying content type.
					headers.remove(CONTENT_TYPE);

					Some(reqwest_form(form)?)
				},
				_ => None,
			};
			let mut builder = client.request(method, url).headers(headers);

			if let Some(form) = form {
				builder = builder.multipart(form);
			} else if let Some(RequestBody::Bytes(bytes)) = body {
				builder = builder.body(bytes);
			}

			let response = builder.send().await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let body = response.bytes().await?;

			Ok(ApiResponse::new(status, headers, body.to_vec()))
		})
	}
}

/// Builds a fresh reqwest form for one attempt; part content types must parse as MIME types.
#[cfg(feature = "reqwest")]
pub fn reqwest_form(form: &MultipartForm) -> Result<reqwest::multipart::Form, TransportError> {
	form.parts().iter().try_fold(reqwest::multipart::Form::new(), |acc, field| {
		let mut part = reqwest::multipart::Part::bytes(field.data.clone());

		if let Some(file_name) = &field.file_name {
			part = part.file_name(file_name.clone());
		}
		if let Some(content_type) = &field.content_type {
			part = part
				.mime_str(content_type)
				.map_err(|e| TransportError::invalid_form_part(field.name.as_str(), e))?;
		}

		Ok(acc.part(field.name.clone(), part))
	})
}
