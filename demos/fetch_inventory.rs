//! Demonstrates the authenticated client against a mock ERP backend: an expired token is
//! rejected with `401`, refreshed once, and the inventory listing is decoded from JSON.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde::Deserialize;
use url::Url;
// self
use erp_api_client::{
	auth::{Principal, PrincipalId},
	client::ReqwestApiClient,
	config::ClientConfig,
	identity::MemoryIdentity,
};

#[derive(Debug, Deserialize)]
struct InventoryItem {
	sku: String,
	on_hand: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let expired = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/inventory").header("authorization", "Bearer expired");
			then.status(401).body("token expired");
		})
		.await;
	let listing = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/inventory").header("authorization", "Bearer renewed");
			then.status(200)
				.header("content-type", "application/json")
				.body("[{\"sku\":\"A-1\",\"on_hand\":12},{\"sku\":\"B-7\",\"on_hand\":0}]");
		})
		.await;
	let identity = MemoryIdentity::signed_in(
		Principal::new(PrincipalId::new("clerk-01")?).with_display_name("Front desk"),
		"expired",
	);

	identity.rotate_token("renewed");

	let config = ClientConfig::builder(Url::parse(&server.base_url())?).build()?;
	let client = ReqwestApiClient::new(config, Arc::new(identity));
	let items: Vec<InventoryItem> = client.get_json("/api/inventory").await?;

	for item in &items {
		println!("{:>6} on hand: {}", item.sku, item.on_hand);
	}

	println!(
		"Attempts: {}, retries: {}, token lookups: {}.",
		client.metrics.attempts(),
		client.metrics.retries(),
		client.metrics.token_fetches()
	);

	expired.assert_async().await;
	listing.assert_async().await;

	Ok(())
}
