//! Token resolution with in-flight deduplication.
//!
//! Non-forced lookups share one pending resolution per client: the first caller registers it
//! in the in-flight slot, later callers join it, and whichever future completes the lookup
//! clears the slot before publishing the outcome. Settled outcomes are never cached, so the
//! next caller after settlement always starts a fresh lookup. Forced lookups bypass the slot.

// self
use crate::{
	_prelude::*,
	auth::{BearerToken, Principal},
	client::ClientMetrics,
	identity::IdentityTokenSource,
	obs::{self, RequestOutcome, RequestStage},
};

type InflightSlot = Arc<Mutex<Option<Arc<PendingResolution>>>>;

/// Outcome shared by every caller that joined the same non-forced lookup.
#[derive(Debug, Default)]
struct PendingResolution {
	outcome: AsyncOnceCell<Option<BearerToken>>,
}

/// Resolves bearer tokens through an [`IdentityTokenSource`], collapsing concurrent
/// non-forced lookups into one identity call.
///
/// Clones share the in-flight slot.
#[derive(Clone)]
pub struct TokenResolver {
	identity: Arc<dyn IdentityTokenSource>,
	metrics: Arc<ClientMetrics>,
	inflight: InflightSlot,
}
impl TokenResolver {
	/// Creates a resolver over `identity`, recording lookups in `metrics`.
	pub fn new(identity: Arc<dyn IdentityTokenSource>, metrics: Arc<ClientMetrics>) -> Self {
		Self { identity, metrics, inflight: Default::default() }
	}

	/// Returns a token for the signed-in principal, or `None` when nobody is signed in or the
	/// identity source failed.
	pub async fn resolve(&self, force_refresh: bool) -> Option<BearerToken> {
		let principal = self.identity.current_principal()?;

		if force_refresh {
			return self.fetch(&principal, true).await;
		}

		let pending = self.join_or_register();

		pending.outcome.get_or_init(|| self.settle(&pending, principal)).await.clone()
	}

	/// Returns `true` while a non-forced lookup is outstanding.
	pub fn is_pending(&self) -> bool {
		self.inflight.lock().is_some()
	}

	fn join_or_register(&self) -> Arc<PendingResolution> {
		self.inflight.lock().get_or_insert_with(Default::default).clone()
	}

	async fn settle(
		&self,
		pending: &Arc<PendingResolution>,
		principal: Principal,
	) -> Option<BearerToken> {
		let outcome = self.fetch(&principal, false).await;
		let mut slot = self.inflight.lock();

		// Cleared before the cell publishes, so no caller can join a settled lookup.
		if slot.as_ref().is_some_and(|current| Arc::ptr_eq(current, pending)) {
			*slot = None;
		}

		outcome
	}

	async fn fetch(&self, principal: &Principal, force_refresh: bool) -> Option<BearerToken> {
		const STAGE: RequestStage = RequestStage::ResolveToken;

		self.metrics.record_token_fetch();
		obs::record_request_outcome(STAGE, RequestOutcome::Attempt);

		match self.identity.token(principal, force_refresh).await {
			Ok(token) => {
				obs::record_request_outcome(STAGE, RequestOutcome::Success);

				Some(token)
			},
			Err(err) => {
				self.metrics.record_token_failure();
				obs::record_request_outcome(STAGE, RequestOutcome::Failure);
				obs::identity_failed(&err, force_refresh);

				None
			},
		}
	}
}
impl Debug for TokenResolver {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenResolver").field("pending", &self.is_pending()).finish()
	}
}
