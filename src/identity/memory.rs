//! Thread-safe in-memory [`IdentityTokenSource`] for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{BearerToken, Principal},
	identity::{IdentityError, IdentityFuture, IdentityTokenSource},
};

#[derive(Debug, Default)]
struct Session {
	principal: Option<Principal>,
	token: Option<BearerToken>,
	refreshed: Option<BearerToken>,
}

/// Identity source that keeps one session in-process.
///
/// Non-forced lookups return the current token. A forced refresh promotes the token staged by
/// [`MemoryIdentity::rotate_token`] (when present) before returning it, which mimics a provider
/// issuing a fresh credential.
#[derive(Clone, Debug, Default)]
pub struct MemoryIdentity(Arc<RwLock<Session>>);
impl MemoryIdentity {
	/// Creates a source with `principal` already signed in.
	pub fn signed_in(principal: Principal, token: impl Into<String>) -> Self {
		let identity = Self::default();

		identity.sign_in(principal, token);

		identity
	}

	/// Replaces the session with a freshly signed-in principal.
	pub fn sign_in(&self, principal: Principal, token: impl Into<String>) {
		let mut session = self.0.write();

		session.principal = Some(principal);
		session.token = Some(BearerToken::new(token));
		session.refreshed = None;
	}

	/// Clears the session.
	pub fn sign_out(&self) {
		*self.0.write() = Session::default();
	}

	/// Stages the token handed out by the next forced refresh.
	pub fn rotate_token(&self, token: impl Into<String>) {
		self.0.write().refreshed = Some(BearerToken::new(token));
	}

	fn token_now(
		&self,
		principal: &Principal,
		force_refresh: bool,
	) -> Result<BearerToken, IdentityError> {
		let mut session = self.0.write();

		if session.principal.as_ref().map(|p| &p.id) != Some(&principal.id) {
			return Err(IdentityError::Rejected {
				reason: format!("{} is not signed in", principal.id),
			});
		}

		let staged = if force_refresh { session.refreshed.take() } else { None };

		if let Some(next) = staged {
			session.token = Some(next);
		}

		session
			.token
			.clone()
			.ok_or_else(|| IdentityError::Unavailable { message: "no token issued".into() })
	}
}
impl IdentityTokenSource for MemoryIdentity {
	fn current_principal(&self) -> Option<Principal> {
		self.0.read().principal.clone()
	}

	fn token<'a>(&'a self, principal: &'a Principal, force_refresh: bool) -> IdentityFuture<'a> {
		Box::pin(async move { self.token_now(principal, force_refresh) })
	}
}
