//! Per-attempt request description and the header builder that produces its headers.

// crates.io
use http::{
	Method,
	header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
// self
use crate::{_prelude::*, auth::BearerToken, error::ConfigError, transport::RequestBody};

/// The effective HTTP request for one physical attempt.
///
/// Envelopes are never patched in place: a retry builds a new envelope from the caller's
/// original headers and the refreshed token.
#[derive(Clone, Debug)]
pub struct RequestEnvelope {
	/// HTTP method.
	pub method: Method,
	/// Fully resolved target URL.
	pub url: Url,
	/// Effective headers (caller headers plus injected ones).
	pub headers: HeaderMap,
	/// Optional payload.
	pub body: Option<RequestBody>,
}
impl RequestEnvelope {
	/// Builds the envelope for one attempt.
	pub fn new(
		method: Method,
		url: Url,
		prior: &HeaderMap,
		token: Option<&BearerToken>,
		body: Option<RequestBody>,
	) -> Result<Self, ConfigError> {
		let headers = build_headers(prior, token, body.as_ref())?;

		Ok(Self { method, url, headers, body })
	}

	/// Returns the `Authorization` header value, if one was injected or supplied.
	pub fn authorization(&self) -> Option<&HeaderValue> {
		self.headers.get(AUTHORIZATION)
	}
}

/// Produces the header set for one attempt without touching `prior`.
///
/// - `Authorization: Bearer <token>` is set only when a token is present.
/// - `Content-Type: application/json` is defaulted for non-multipart bodies when the caller
///   did not choose a content type.
pub fn build_headers(
	prior: &HeaderMap,
	token: Option<&BearerToken>,
	body: Option<&RequestBody>,
) -> Result<HeaderMap, ConfigError> {
	let mut headers = prior.clone();

	if let Some(token) = token {
		headers.insert(AUTHORIZATION, token.header_value()?);
	}
	if body.is_some_and(|body| !body.is_multipart()) && !headers.contains_key(CONTENT_TYPE) {
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
	}

	Ok(headers)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::transport::MultipartForm;

	#[test]
	fn token_and_json_default_are_injected_without_mutating_prior() {
		let mut prior = HeaderMap::new();

		prior.insert("x-tenant", HeaderValue::from_static("acme"));

		let token = BearerToken::new("t1");
		let body = RequestBody::Bytes(b"{}".to_vec());
		let headers = build_headers(&prior, Some(&token), Some(&body))
			.expect("Headers should build for an ASCII token.");

		assert_eq!(headers.get(AUTHORIZATION).map(|v| v.as_bytes()), Some(&b"Bearer t1"[..]));
		assert_eq!(headers.get(CONTENT_TYPE), Some(&HeaderValue::from_static("application/json")));
		assert_eq!(headers.get("x-tenant"), Some(&HeaderValue::from_static("acme")));
		assert_eq!(prior.len(), 1, "Caller headers must not be mutated.");
	}

	#[test]
	fn absent_token_and_body_leave_headers_untouched() {
		let headers =
			build_headers(&HeaderMap::new(), None, None).expect("Empty headers should build.");

		assert!(headers.is_empty());
	}

	#[test]
	fn caller_content_type_and_multipart_are_respected() {
		let mut prior = HeaderMap::new();

		prior.insert(CONTENT_TYPE, HeaderValue::from_static("text/csv"));

		let csv = RequestBody::Bytes(b"sku,qty".to_vec());
		let headers = build_headers(&prior, None, Some(&csv)).expect("Headers should build.");

		assert_eq!(headers.get(CONTENT_TYPE), Some(&HeaderValue::from_static("text/csv")));

		let form = RequestBody::Multipart(MultipartForm::new().text("a", "b"));
		let headers =
			build_headers(&HeaderMap::new(), None, Some(&form)).expect("Headers should build.");

		assert!(headers.get(CONTENT_TYPE).is_none());
	}

	#[test]
	fn caller_authorization_is_replaced_by_resolved_token() {
		let mut prior = HeaderMap::new();

		prior.insert(AUTHORIZATION, HeaderValue::from_static("Bearer stale"));

		let token = BearerToken::new("fresh");
		let envelope = RequestEnvelope::new(
			Method::GET,
			Url::parse("https://erp.example.com/api/items").expect("URL should parse."),
			&prior,
			Some(&token),
			None,
		)
		.expect("Envelope should build.");

		assert_eq!(envelope.authorization(), Some(&HeaderValue::from_static("Bearer fresh")));
	}
}
