//! Walks one console session against a mock backend: sign in, list customers, survive a token
//! expiry on a deposit, then sign out.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use ledger_console_client::{
	client::{Amount, ReqwestHttpClient},
	config::ClientConfig,
	recovery::ReauthFlag,
	session::{MemorySessionStore, SessionStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/login");
			then.status(200)
				.header("content-type", "application/json")
				.header("set-cookie", "refreshToken=demo-refresh; Path=/; HttpOnly")
				.body("{\"accessToken\":\"demo-access-1\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/customer/list");
			then.status(200)
				.header("content-type", "application/json")
				.body("[{\"id\":5,\"name\":\"Ada\"}]");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/transactions/deposit/5/10.00")
				.header("authorization", "Bearer demo-access-1");
			then.status(401);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"accessToken\":\"demo-access-2\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/transactions/deposit/5/10.00")
				.header("authorization", "Bearer demo-access-2");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":1001,\"amount\":\"10.00\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/logout");
			then.status(204);
		})
		.await;

	let config = ClientConfig::builder().base_url_str(&server.base_url())?.build()?;
	let session = Arc::new(MemorySessionStore::default());
	let reauth = Arc::new(ReauthFlag::default());
	let client = ReqwestHttpClient::new(config, session.clone())?.with_reauth_listener(reauth.clone());

	client.login("ada@example.com", "correct horse").await?;

	let customers: serde_json::Value = client.get("/customer/list").await?;

	println!("Customers: {customers}.");

	let receipt = client.deposit(5, Amount::parse("10.00")?, Some("demo")).await?;

	println!("Deposit {} booked under key {}.", receipt.payload["id"], receipt.idempotency_key);
	println!("Session renewed: {}.", session.get().is_some_and(|c| c.expose() == "demo-access-2"));

	client.logout().await?;

	println!("Signed in after logout: {}.", client.is_authenticated());
	println!("Re-authentication requested: {}.", reauth.is_required());

	Ok(())
}
