//! Connectivity probe for status banners.

// self
use crate::{
	_prelude::*,
	client::HttpClient,
	http::{ApiTransport, RequestDescriptor},
};

/// Authenticated listing used to probe reachability and session validity.
pub const PROBE_PATH: &str = "/customer/list";

/// Snapshot of backend reachability and session validity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionStatus {
	/// Backend answered at all.
	pub connected: bool,
	/// Backend accepted the current credential.
	pub authenticated: bool,
	/// Human-readable problem description, if any.
	pub error: Option<String>,
}

impl<T> HttpClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Probes the backend without triggering recovery.
	///
	/// Only a network failure reports the backend as disconnected. A 401 is reported as "not
	/// authenticated" instead of renewing the session, so polling the probe never clears a
	/// session or signals re-authentication. Any other failure counts as connected and
	/// authenticated, with its message attached.
	pub async fn probe(&self) -> ConnectionStatus {
		let request = RequestDescriptor::get(PROBE_PATH);

		match self.recovery.send_once(&request).await {
			Err(Error::Network(_)) => ConnectionStatus {
				connected: false,
				authenticated: false,
				error: Some("Backend not reachable".into()),
			},
			Err(Error::AuthExpired { .. }) => ConnectionStatus {
				connected: true,
				authenticated: false,
				error: Some("Not authenticated".into()),
			},
			Err(err) =>
				ConnectionStatus { connected: true, authenticated: true, error: Some(err.to_string()) },
			Ok(response) if !response.is_success() => ConnectionStatus {
				connected: true,
				authenticated: true,
				error: Some(response.into_server_error().to_string()),
			},
			Ok(_) => ConnectionStatus { connected: true, authenticated: true, error: None },
		}
	}
}
