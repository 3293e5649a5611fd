//! Contract consumed from the identity provider that owns sign-in and token issuance.
//!
//! The client only needs two capabilities: a synchronous peek at the signed-in
//! [`Principal`] and an asynchronous bearer-token lookup that can optionally bypass the
//! provider's cache. Token lifetimes and renewal policy stay inside the implementation.

pub mod memory;

pub use memory::MemoryIdentity;

// self
use crate::{
	_prelude::*,
	auth::{BearerToken, Principal},
};

/// Boxed future returned by [`IdentityTokenSource::token`].
pub type IdentityFuture<'a> =
	Pin<Box<dyn Future<Output = Result<BearerToken, IdentityError>> + 'a + Send>>;

/// Identity provider seam used by the token resolver.
pub trait IdentityTokenSource
where
	Self: Send + Sync,
{
	/// Returns the signed-in principal, if any. Must not perform I/O.
	fn current_principal(&self) -> Option<Principal>;

	/// Obtains a bearer token for `principal`; `force_refresh` bypasses any provider cache.
	fn token<'a>(&'a self, principal: &'a Principal, force_refresh: bool) -> IdentityFuture<'a>;
}

/// Failure reported by an [`IdentityTokenSource`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum IdentityError {
	/// Provider could not be reached or answered unexpectedly.
	#[error("Identity provider is unavailable: {message}.")]
	Unavailable {
		/// Human-readable error payload.
		message: String,
	},
	/// Provider refused to issue a token for the principal.
	#[error("Identity provider rejected the token request: {reason}.")]
	Rejected {
		/// Provider-supplied reason string.
		reason: String,
	},
}
