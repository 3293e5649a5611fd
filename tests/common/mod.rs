#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};
// crates.io
use http::{HeaderMap, StatusCode};
use parking_lot::Mutex;
use url::Url;
// self
use erp_api_client::{
	auth::{BearerToken, Principal, PrincipalId},
	client::ApiClient,
	config::ClientConfig,
	error::TransportError,
	identity::{IdentityError, IdentityFuture, IdentityTokenSource},
	transport::{ApiResponse, HttpTransport, RequestEnvelope, TransportFuture},
};

/// Scripted reply served by [`FakeTransport`].
pub enum Reply {
	Status(u16, &'static str),
	Delayed(Duration, u16, &'static str),
	NetworkDown,
}

#[derive(Debug)]
pub struct Offline;
impl std::fmt::Display for Offline {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.write_str("Network unreachable.")
	}
}
impl std::error::Error for Offline {}

/// Transport that records every envelope and replays scripted replies in order.
#[derive(Default)]
pub struct FakeTransport {
	replies: Mutex<VecDeque<Reply>>,
	sent: Mutex<Vec<RequestEnvelope>>,
}
impl FakeTransport {
	pub fn scripted(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
		Arc::new(Self { replies: Mutex::new(replies.into_iter().collect()), ..Default::default() })
	}

	pub fn sent(&self) -> Vec<RequestEnvelope> {
		self.sent.lock().clone()
	}

	pub fn authorizations(&self) -> Vec<Option<String>> {
		self.sent
			.lock()
			.iter()
			.map(|envelope| {
				envelope.authorization().and_then(|value| value.to_str().ok()).map(str::to_owned)
			})
			.collect()
	}
}
impl HttpTransport for FakeTransport {
	fn send(&self, envelope: RequestEnvelope) -> TransportFuture<'_> {
		self.sent.lock().push(envelope);

		let reply = self.replies.lock().pop_front().unwrap_or(Reply::Status(200, "{}"));

		Box::pin(async move {
			let (delay, status, body) = match reply {
				Reply::Status(status, body) => (Duration::ZERO, status, body),
				Reply::Delayed(delay, status, body) => (delay, status, body),
				Reply::NetworkDown => return Err(TransportError::network(Offline)),
			};

			if !delay.is_zero() {
				tokio::time::sleep(delay).await;
			}

			let status = StatusCode::from_u16(status).expect("Scripted status should be valid.");

			Ok(ApiResponse::new(status, HeaderMap::new(), body.as_bytes().to_vec()))
		})
	}
}

/// Identity source that hands out `t1`, `t2`, ... and counts lookups.
pub struct CountingIdentity {
	principal: Mutex<Option<Principal>>,
	fail_forced: bool,
	delay: Duration,
	calls: AtomicUsize,
	forced: AtomicUsize,
}
impl CountingIdentity {
	pub fn signed_in() -> Arc<Self> {
		Arc::new(Self::new(Some(principal("alice")), false, Duration::ZERO))
	}

	pub fn signed_out() -> Arc<Self> {
		Arc::new(Self::new(None, false, Duration::ZERO))
	}

	pub fn failing_refresh() -> Arc<Self> {
		Arc::new(Self::new(Some(principal("alice")), true, Duration::ZERO))
	}

	pub fn slow(delay: Duration) -> Arc<Self> {
		Arc::new(Self::new(Some(principal("alice")), false, delay))
	}

	fn new(principal: Option<Principal>, fail_forced: bool, delay: Duration) -> Self {
		Self {
			principal: Mutex::new(principal),
			fail_forced,
			delay,
			calls: AtomicUsize::new(0),
			forced: AtomicUsize::new(0),
		}
	}

	pub fn sign_out(&self) {
		*self.principal.lock() = None;
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn forced_calls(&self) -> usize {
		self.forced.load(Ordering::SeqCst)
	}
}
impl IdentityTokenSource for CountingIdentity {
	fn current_principal(&self) -> Option<Principal> {
		self.principal.lock().clone()
	}

	fn token<'a>(&'a self, _principal: &'a Principal, force_refresh: bool) -> IdentityFuture<'a> {
		let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

		if force_refresh {
			self.forced.fetch_add(1, Ordering::SeqCst);
		}

		Box::pin(async move {
			if !self.delay.is_zero() {
				tokio::time::sleep(self.delay).await;
			}
			if force_refresh && self.fail_forced {
				return Err(IdentityError::Unavailable { message: "refresh endpoint down".into() });
			}

			Ok(BearerToken::new(format!("t{n}")))
		})
	}
}

pub fn principal(id: &str) -> Principal {
	Principal::new(PrincipalId::new(id).expect("Principal fixture should be valid."))
}

pub fn config(base: &str) -> ClientConfig {
	ClientConfig::builder(Url::parse(base).expect("Base URL fixture should parse."))
		.build()
		.expect("Client config fixture should be valid.")
}

pub fn fake_client(
	transport: Arc<FakeTransport>,
	identity: Arc<dyn IdentityTokenSource>,
) -> ApiClient<FakeTransport> {
	ApiClient::with_transport(config("https://erp.example.com"), identity, transport)
}
