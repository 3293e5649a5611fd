//! Request payloads, including multipart forms encoded by the transport at send time.

// self
use crate::{_prelude::*, error::ConfigError};

/// Payload attached to an outbound request.
///
/// Bodies are cloned into every attempt, so a retried request replays exactly the same bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody {
	/// Pre-serialized payload; defaults to `Content-Type: application/json`.
	Bytes(Vec<u8>),
	/// Multipart form; the transport encodes it and owns the `Content-Type` (with boundary).
	Multipart(MultipartForm),
}
impl RequestBody {
	/// Serializes `value` as JSON.
	pub fn json<T>(value: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		Ok(Self::Bytes(serde_json::to_vec(value)?))
	}

	/// Returns `true` for multipart payloads, which never receive the JSON default.
	pub fn is_multipart(&self) -> bool {
		matches!(self, Self::Multipart(_))
	}
}
impl From<Vec<u8>> for RequestBody {
	fn from(value: Vec<u8>) -> Self {
		Self::Bytes(value)
	}
}
impl From<String> for RequestBody {
	fn from(value: String) -> Self {
		Self::Bytes(value.into_bytes())
	}
}
impl From<MultipartForm> for RequestBody {
	fn from(value: MultipartForm) -> Self {
		Self::Multipart(value)
	}
}

/// A single `multipart/form-data` field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPart {
	/// Field name.
	pub name: String,
	/// File name for file uploads.
	pub file_name: Option<String>,
	/// Part content type for file uploads; validated as a MIME type by the transport.
	pub content_type: Option<String>,
	/// Raw field content.
	pub data: Vec<u8>,
}

/// Ordered collection of form fields, e.g. a CSV upload plus its options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
	parts: Vec<FormPart>,
}
impl MultipartForm {
	/// Creates an empty form.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a plain text field.
	pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.parts.push(FormPart {
			name: name.into(),
			file_name: None,
			content_type: None,
			data: value.into().into_bytes(),
		});

		self
	}

	/// Appends a file field.
	pub fn file(
		mut self,
		name: impl Into<String>,
		file_name: impl Into<String>,
		content_type: impl Into<String>,
		data: impl Into<Vec<u8>>,
	) -> Self {
		self.parts.push(FormPart {
			name: name.into(),
			file_name: Some(file_name.into()),
			content_type: Some(content_type.into()),
			data: data.into(),
		});

		self
	}

	/// Returns the fields in insertion order.
	pub fn parts(&self) -> &[FormPart] {
		&self.parts
	}
}
