//! Authenticated API client for the ledger banking console.
//!
//! Bearer sessions, transparent refresh-and-retry and idempotent transaction submissions sit
//! behind one call surface.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod authenticator;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod recovery;
pub mod session;
#[cfg(feature = "reqwest")]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests and demos.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::HttpClient,
		config::ClientConfig,
		http::ReqwestTransport,
		recovery::ReauthFlag,
		session::{MemorySessionStore, SessionStore},
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = HttpClient<ReqwestTransport>;

	/// Builds a cookie-aware reqwest transport suitable for talking to `httpmock` servers.
	pub fn test_reqwest_transport() -> ReqwestTransport {
		ReqwestTransport::new().expect("Failed to build Reqwest transport for tests.")
	}

	/// Constructs an [`HttpClient`] pointed at `base_url`, backed by an in-memory session store
	/// and a [`ReauthFlag`] so tests can observe re-authentication signals.
	pub fn build_reqwest_test_client(
		base_url: &str,
	) -> (ReqwestTestClient, Arc<MemorySessionStore>, Arc<ReauthFlag>) {
		let config = ClientConfig::builder()
			.base_url(Url::parse(base_url).expect("Mock server URL should parse successfully."))
			.build()
			.expect("Test client configuration should be valid.");
		let session_backend = Arc::new(MemorySessionStore::default());
		let session: Arc<dyn SessionStore> = session_backend.clone();
		let reauth = Arc::new(ReauthFlag::default());
		let client = ReqwestTestClient::with_transport(config, session, test_reqwest_transport())
			.with_reauth_listener(reauth.clone());

		(client, session_backend, reauth)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value as JsonValue;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
