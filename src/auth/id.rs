//! Validated identifier of a signed-in principal.

// self
use crate::_prelude::*;

const PRINCIPAL_ID_MAX_LEN: usize = 128;

/// Error returned when a principal identifier fails validation.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum PrincipalIdError {
	/// The identifier was empty.
	#[error("Principal identifier cannot be empty.")]
	Empty,
	/// The identifier contains whitespace or control characters.
	#[error("Principal identifier contains whitespace or control characters.")]
	InvalidCharacter,
	/// The identifier exceeded the allowed length.
	#[error("Principal identifier exceeds {max} bytes.")]
	TooLong {
		/// Maximum permitted length in bytes.
		max: usize,
	},
}

/// Stable identifier (user id / uid) of a signed-in principal.
///
/// Identifiers end up in log fields and error messages, so they are kept short and free of
/// whitespace.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrincipalId(String);
impl PrincipalId {
	/// Validates and wraps `value`.
	pub fn new(value: impl Into<String>) -> Result<Self, PrincipalIdError> {
		let value = value.into();

		if value.is_empty() {
			return Err(PrincipalIdError::Empty);
		}
		if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
			return Err(PrincipalIdError::InvalidCharacter);
		}
		if value.len() > PRINCIPAL_ID_MAX_LEN {
			return Err(PrincipalIdError::TooLong { max: PRINCIPAL_ID_MAX_LEN });
		}

		Ok(Self(value))
	}

	/// Returns the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for PrincipalId {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}
impl TryFrom<String> for PrincipalId {
	type Error = PrincipalIdError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl From<PrincipalId> for String {
	fn from(value: PrincipalId) -> Self {
		value.0
	}
}
impl FromStr for PrincipalId {
	type Err = PrincipalIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for PrincipalId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "PrincipalId({})", self.0)
	}
}
impl Display for PrincipalId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
