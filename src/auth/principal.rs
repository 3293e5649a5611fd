//! The signed-in user or session as reported by the identity source.

// self
use crate::{_prelude::*, auth::PrincipalId};

/// Currently authenticated principal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	/// Stable principal identifier.
	pub id: PrincipalId,
	/// Optional human-readable name (email, display name).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
}
impl Principal {
	/// Creates a principal without a display name.
	pub fn new(id: PrincipalId) -> Self {
		Self { id, display_name: None }
	}

	/// Attaches a display name.
	pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
		self.display_name = Some(name.into());

		self
	}
}
