#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use ledger_console_client::{_preludet::*, session::SessionStore};

#[tokio::test]
async fn login_stores_token_and_later_requests_carry_it() {
	let server = MockServer::start_async().await;
	let (client, session, _) = build_reqwest_test_client(&server.base_url());
	let login = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/login");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"accessToken\":\"T1\"}");
		})
		.await;
	let customers = server
		.mock_async(|when, then| {
			when.method(GET).path("/customer/list").header("authorization", "Bearer T1");
			then.status(200).header("content-type", "application/json").body("[{\"id\":1}]");
		})
		.await;
	let credential =
		client.login("a@x.com", "secret").await.expect("Login should succeed against the mock.");

	assert_eq!(credential.expose(), "T1");
	assert_eq!(session.get().map(|c| c.expose().to_owned()), Some("T1".into()));
	assert!(client.is_authenticated());

	let listed: JsonValue =
		client.get("/customer/list").await.expect("Authenticated listing should succeed.");

	assert_eq!(listed[0]["id"], 1);

	login.assert_async().await;
	customers.assert_async().await;
}

#[tokio::test]
async fn login_rejection_is_a_server_error_without_refresh() {
	let server = MockServer::start_async().await;
	let (client, session, reauth) = build_reqwest_test_client(&server.base_url());
	let login = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/login");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"message\":\"Invalid credentials\"}");
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(200).body("{\"accessToken\":\"never\"}");
		})
		.await;
	let err = client.login("a@x.com", "wrong").await.expect_err("Rejected login should fail.");

	match err {
		Error::Server { status, message, .. } => {
			assert_eq!(status, 401);
			assert_eq!(message, "Invalid credentials");
		},
		other => panic!("Unexpected error: {other:?}."),
	}

	assert!(session.get().is_none());
	assert!(!reauth.is_required());

	login.assert_async().await;
	refresh.assert_calls_async(0).await;
}

#[tokio::test]
async fn login_with_blank_token_is_rejected() {
	let server = MockServer::start_async().await;
	let (client, session, _) = build_reqwest_test_client(&server.base_url());

	server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/login");
			then.status(200).header("content-type", "application/json").body("{\"accessToken\":\"\"}");
		})
		.await;

	let err = client.login("a@x.com", "secret").await.expect_err("Blank token should be rejected.");

	assert!(matches!(err, Error::InvalidCredential));
	assert!(session.get().is_none());
}

#[tokio::test]
async fn register_returns_payload_and_leaves_session_untouched() {
	let server = MockServer::start_async().await;
	let (client, session, _) = build_reqwest_test_client(&server.base_url());
	let register = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/register").header("content-type", "application/json");
			then.status(201).header("content-type", "application/json").body("{\"id\":42}");
		})
		.await;
	let created: JsonValue = client
		.register(&serde_json::json!({ "email": "a@x.com", "password": "secret" }))
		.await
		.expect("Registration should succeed.");

	assert_eq!(created["id"], 42);
	assert!(session.get().is_none());

	register.assert_async().await;
}

#[tokio::test]
async fn logout_clears_session_even_when_backend_fails() {
	let server = MockServer::start_async().await;
	let (client, session, _) = build_reqwest_test_client(&server.base_url());
	let logout = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/logout");
			then.status(500).body("{\"error\":\"Internal Server Error\"}");
		})
		.await;

	session.set("T1");

	let err = client.logout().await.expect_err("Remote logout failure should be reported.");

	assert_eq!(err.status(), Some(500));
	assert!(session.get().is_none());

	logout.assert_async().await;
}

#[tokio::test]
async fn logout_clears_session_when_backend_is_unreachable() {
	let (client, session, _) = build_reqwest_test_client("http://127.0.0.1:1");

	session.set("T1");

	let err = client.logout().await.expect_err("Unreachable backend should surface an error.");

	assert!(matches!(err, Error::Network(_)));
	assert!(session.get().is_none());
}

#[tokio::test]
async fn logout_success_clears_session() {
	let server = MockServer::start_async().await;
	let (client, session, _) = build_reqwest_test_client(&server.base_url());
	let logout = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/logout").header("authorization", "Bearer T1");
			then.status(204);
		})
		.await;

	session.set("T1");
	client.logout().await.expect("Logout should succeed.");

	assert!(!client.is_authenticated());

	logout.assert_async().await;
}

#[tokio::test]
async fn probe_reports_connectivity_without_recovering() {
	let server = MockServer::start_async().await;
	let (client, session, reauth) = build_reqwest_test_client(&server.base_url());
	let listing = server
		.mock_async(|when, then| {
			when.method(GET).path("/customer/list");
			then.status(401);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(200).body("{\"accessToken\":\"never\"}");
		})
		.await;

	session.set("T1");

	let status = client.probe().await;

	assert!(status.connected);
	assert!(!status.authenticated);
	assert_eq!(status.error.as_deref(), Some("Not authenticated"));
	assert!(session.get().is_some());
	assert!(!reauth.is_required());

	listing.assert_async().await;
	refresh.assert_calls_async(0).await;

	let (offline, _, _) = build_reqwest_test_client("http://127.0.0.1:1");
	let status = offline.probe().await;

	assert!(!status.connected);
	assert_eq!(status.error.as_deref(), Some("Backend not reachable"));
}
