//! Client-level error types shared across the resolver, transport, and JSON helpers.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Identity-source failures never show up here: the token resolver downgrades them to an
/// unauthenticated request instead.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (network, timeout, cancellation, unencodable payload).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Backend answered with a non-2xx status (JSON helpers only).
	#[error("Request failed: {message}")]
	RequestFailed {
		/// HTTP status code returned by the backend.
		status: u16,
		/// Response body text, or a generic message when the body was empty.
		message: String,
	},
	/// Backend answered 2xx with a body that does not decode into the expected type.
	#[error("Response body could not be decoded as JSON.")]
	Decode {
		/// Structured parsing failure with the JSON path that failed.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the decoded response.
		status: u16,
	},
}
impl Error {
	/// Returns `true` when the failure came from the internal deadline.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Transport(TransportError::Timeout { .. }))
	}

	/// Returns `true` when the caller-supplied cancellation token fired.
	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Transport(TransportError::Cancelled))
	}

	/// Returns the backend status attached to the failure, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::RequestFailed { status, .. } | Self::Decode { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client configuration failed validation.
	#[error(transparent)]
	Client(#[from] crate::config::ClientConfigError),
	/// Request target cannot be resolved against the base URL.
	#[error("Request target `{target}` is not a valid URL.")]
	InvalidTarget {
		/// Target string supplied by the caller.
		target: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Bearer token contains bytes that are not legal in a header value.
	#[error("Bearer token cannot be encoded as a header value.")]
	InvalidHeader(#[from] http::header::InvalidHeaderValue),
	/// Request body could not be serialized.
	#[error("Request body could not be serialized as JSON.")]
	BodyEncode(#[from] serde_json::Error),
}
impl From<crate::config::ClientConfigError> for Error {
	fn from(e: crate::config::ClientConfigError) -> Self {
		Self::Config(e.into())
	}
}

/// Transport-level failures: network errors, the deadline, caller cancellation, and payloads
/// the transport refuses to put on the wire.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The client's internal deadline elapsed before a final response arrived.
	#[error("Request timed out after {} ms.", .after.as_millis())]
	Timeout {
		/// Deadline that was exceeded.
		after: Duration,
	},
	/// The caller-supplied cancellation token fired.
	#[error("Request was cancelled by the caller.")]
	Cancelled,
	/// A multipart field was rejected before sending (e.g. an invalid content type).
	#[error("Form part `{name}` cannot be encoded.")]
	InvalidFormPart {
		/// Name of the rejected field.
		name: String,
		/// Underlying encoding failure.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a failure to encode the multipart field `name`.
	pub fn invalid_form_part(
		name: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::InvalidFormPart { name: name.into(), source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
