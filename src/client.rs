//! Authenticated request client for the ERP API.
//!
//! [`ApiClient`] owns the transport, identity source, configuration, and token resolver so a
//! call site only supplies a target and [`RequestOptions`]. Every logical request:
//!
//! 1. picks a cancellation boundary (caller token, or the configured deadline),
//! 2. resolves a bearer token, sharing any in-flight non-forced lookup,
//! 3. sends attempt #1 and, on `401` with a signed-in principal, forces one token refresh and
//!    sends attempt #2, whose response is final.
//!
//! Statuses other than `401` are returned untouched by [`ApiClient::request`]; the JSON helpers
//! in [`json`] turn non-2xx responses into [`Error::RequestFailed`].

pub mod json;
pub mod metrics;
pub mod resolver;

mod cancel;
mod request;

pub use metrics::ClientMetrics;
pub use resolver::TokenResolver;

// crates.io
use http::{
	Method,
	header::{HeaderMap, HeaderName, HeaderValue},
};
use tokio_util::sync::CancellationToken;
// self
use crate::{
	_prelude::*,
	config::ClientConfig,
	error::ConfigError,
	identity::IdentityTokenSource,
	transport::{HttpTransport, MultipartForm, RequestBody},
};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// Attaches bearer tokens to ERP API calls and applies the retry and deadline policy.
///
/// Clones share the transport, metrics, and in-flight token lookup.
pub struct ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Transport used for every physical attempt.
	pub transport: Arc<T>,
	/// Identity source consulted for the principal and bearer tokens.
	pub identity: Arc<dyn IdentityTokenSource>,
	/// Base URL and deadline.
	pub config: ClientConfig,
	/// Counters for requests, retries, token lookups, and timers.
	pub metrics: Arc<ClientMetrics>,
	resolver: TokenResolver,
}
impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		config: ClientConfig,
		identity: Arc<dyn IdentityTokenSource>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		let metrics = Arc::<ClientMetrics>::default();
		let resolver = TokenResolver::new(identity.clone(), metrics.clone());

		Self { transport: transport.into(), identity, config, metrics, resolver }
	}

	/// Token resolver shared by every request issued through this client.
	pub fn token_resolver(&self) -> &TokenResolver {
		&self.resolver
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: ClientConfig, identity: Arc<dyn IdentityTokenSource>) -> Self {
		Self::with_transport(config, identity, ReqwestTransport::default())
	}
}
impl<T> Clone for ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			identity: self.identity.clone(),
			config: self.config.clone(),
			metrics: self.metrics.clone(),
			resolver: self.resolver.clone(),
		}
	}
}
impl<T> Debug for ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("config", &self.config)
			.field("signed_in", &self.identity.current_principal().is_some())
			.field("resolver", &self.resolver)
			.finish()
	}
}

/// Per-call options: method, headers, body, and an optional caller cancellation token.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
	/// HTTP method (defaults to `GET`).
	pub method: Method,
	/// Caller headers; never mutated by the client.
	pub headers: HeaderMap,
	/// Optional payload.
	pub body: Option<RequestBody>,
	/// Caller-owned cancellation; when set, the client's deadline is not applied.
	pub signal: Option<CancellationToken>,
}
impl RequestOptions {
	/// Creates `GET` options with no headers or body.
	pub fn new() -> Self {
		Self::default()
	}

	/// Shorthand for [`Method::POST`].
	pub fn post() -> Self {
		Self::new().with_method(Method::POST)
	}

	/// Shorthand for [`Method::PUT`].
	pub fn put() -> Self {
		Self::new().with_method(Method::PUT)
	}

	/// Shorthand for [`Method::PATCH`].
	pub fn patch() -> Self {
		Self::new().with_method(Method::PATCH)
	}

	/// Shorthand for [`Method::DELETE`].
	pub fn delete() -> Self {
		Self::new().with_method(Method::DELETE)
	}

	/// Overrides the HTTP method.
	pub fn with_method(mut self, method: Method) -> Self {
		self.method = method;

		self
	}

	/// Adds or replaces a header.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Attaches a raw payload.
	pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
		self.body = Some(body.into());

		self
	}

	/// Serializes `value` as the JSON payload.
	pub fn with_json<B>(self, value: &B) -> Result<Self, ConfigError>
	where
		B: ?Sized + Serialize,
	{
		Ok(self.with_body(RequestBody::json(value)?))
	}

	/// Attaches a multipart form payload.
	pub fn with_multipart(self, form: MultipartForm) -> Self {
		self.with_body(RequestBody::Multipart(form))
	}

	/// Hands cancellation to the caller, disabling the client deadline.
	pub fn with_signal(mut self, signal: CancellationToken) -> Self {
		self.signal = Some(signal);

		self
	}
}
