//! Session recovery: detecting authentication failures, renewing the bearer credential once,
//! and tearing the session down when renewal is impossible.
//!
//! Every request runs through a small state machine:
//!
//! ```text
//! NORMAL ──401, marker unset──▶ RECOVERING ──Renewed──▶ NORMAL (retried request)
//!    │                               └──────Failed────▶ TERMINATED
//!    └────401, marker set───────────────────────────────▶ TERMINATED
//! ```
//!
//! The refresh call is sent straight to the transport without the bearer header; it is
//! authenticated by the transport's ambient cookie instead, so an expired token never
//! authenticates its own replacement. Concurrent failures are not coalesced: each failing
//! request performs its own refresh call.

mod listener;
mod metrics;

pub use listener::*;
pub use metrics::RecoveryMetrics;

// self
use metrics::RecoveryEvent;
use crate::{
	_prelude::*,
	auth::{AccessTokenResponse, Credential},
	authenticator::RequestAuthenticator,
	config::ClientConfig,
	http::{ApiResponse, ApiTransport, RequestDescriptor},
	obs::{self, CallKind, CallOutcome, CallSpan},
	session::SessionStore,
};

/// Per-request recovery state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryState {
	/// The response is delivered to the caller as-is.
	Normal,
	/// A refresh-and-retry cycle must run before the caller sees a result.
	Recovering,
	/// The session is gone; the caller receives [`Error::RefreshFailed`].
	Terminated,
}

/// Result of a refresh call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
	/// Backend issued a new bearer credential.
	Renewed(Credential),
	/// Renewal failed for the given reason.
	Failed(String),
}

/// Drives authentication recovery for requests sent through a transport.
pub struct ResponseRecoveryHandler<T>
where
	T: ?Sized + ApiTransport,
{
	transport: Arc<T>,
	session: Arc<dyn SessionStore>,
	authenticator: Arc<dyn RequestAuthenticator>,
	listener: Arc<dyn ReauthListener>,
	metrics: Arc<RecoveryMetrics>,
	base_url: Url,
	refresh_path: String,
	login_route: String,
}
impl<T> ResponseRecoveryHandler<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates a handler bound to one transport + session pair.
	pub fn new(
		config: &ClientConfig,
		transport: Arc<T>,
		session: Arc<dyn SessionStore>,
		authenticator: Arc<dyn RequestAuthenticator>,
		listener: Arc<dyn ReauthListener>,
	) -> Self {
		Self {
			transport,
			session,
			authenticator,
			listener,
			metrics: Default::default(),
			base_url: config.base_url.clone(),
			refresh_path: config.endpoints.refresh.clone(),
			login_route: config.login_route.clone(),
		}
	}

	/// Replaces the re-authentication listener.
	pub fn with_listener(mut self, listener: Arc<dyn ReauthListener>) -> Self {
		self.listener = listener;

		self
	}

	/// Replaces the authenticator applied before every send.
	pub fn with_authenticator(mut self, authenticator: Arc<dyn RequestAuthenticator>) -> Self {
		self.authenticator = authenticator;

		self
	}

	/// Shared recovery counters.
	pub fn metrics(&self) -> &Arc<RecoveryMetrics> {
		&self.metrics
	}

	/// Transport used for every call.
	pub fn transport(&self) -> &Arc<T> {
		&self.transport
	}

	/// Session store consulted before each send.
	pub fn session(&self) -> &Arc<dyn SessionStore> {
		&self.session
	}

	/// Decides the next state for `request` after observing `response`.
	pub fn classify(request: &RequestDescriptor, response: &ApiResponse) -> RecoveryState {
		match (response.is_auth_failure(), request.retried()) {
			(false, _) => RecoveryState::Normal,
			(true, false) => RecoveryState::Recovering,
			(true, true) => RecoveryState::Terminated,
		}
	}

	/// Sends `request` with the current credential attached.
	///
	/// The response is returned unchanged unless it is an authentication failure, in which case
	/// at most one refresh-and-retry cycle runs. The retried request reuses every header of the
	/// original (idempotency key included) and differs only in its bearer credential.
	pub async fn send(&self, request: RequestDescriptor) -> Result<ApiResponse> {
		let mut request = request;

		loop {
			let response = self.dispatch(&request).await?;

			match Self::classify(&request, &response) {
				RecoveryState::Normal => return Ok(response),
				RecoveryState::Recovering => {
					match self.refresh().await {
						RefreshOutcome::Renewed(credential) => self.session.store(credential),
						RefreshOutcome::Failed(reason) =>
							return Err(self.terminate(request.path(), reason)),
					}

					request = request.mark_retried();
				},
				RecoveryState::Terminated =>
					return Err(self.terminate(
						request.path(),
						format!(
							"request was rejected with status {} after the session was renewed",
							response.status
						),
					)),
			}
		}
	}

	/// Sends `request` once without recovery.
	///
	/// An authentication failure is reported as [`Error::AuthExpired`] and leaves the session
	/// untouched; every other response is returned unchanged.
	pub async fn send_once(&self, request: &RequestDescriptor) -> Result<ApiResponse> {
		let response = self.dispatch(request).await?;

		if response.is_auth_failure() {
			Err(Error::AuthExpired { status: response.status })
		} else {
			Ok(response)
		}
	}

	/// Attaches the current credential and hands the request to the transport.
	pub async fn dispatch(&self, request: &RequestDescriptor) -> Result<ApiResponse> {
		let authenticated =
			self.authenticator.authenticate(request.clone(), self.session.get().as_ref());
		let url = authenticated.url(&self.base_url)?;

		self.transport.execute(url, &authenticated).await.inspect_err(|err| {
			if matches!(err, Error::Network(_)) {
				obs::warn_network_failure(request.method(), request.path(), err);
			}
		})
	}

	/// Issues the cookie-authenticated refresh call.
	///
	/// The refresh descriptor never passes through the authenticator.
	pub async fn refresh(&self) -> RefreshOutcome {
		const KIND: CallKind = CallKind::Refresh;

		let span = CallSpan::new(KIND, "refresh");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.metrics.record(RecoveryEvent::Attempt);

		let outcome = span.instrument(self.refresh_inner()).await;

		match &outcome {
			RefreshOutcome::Renewed(_) => {
				self.metrics.record(RecoveryEvent::Renewed);
				obs::record_call_outcome(KIND, CallOutcome::Success);
			},
			RefreshOutcome::Failed(_) => {
				self.metrics.record(RecoveryEvent::RefreshFailed);
				obs::record_call_outcome(KIND, CallOutcome::Failure);
			},
		}

		outcome
	}

	async fn refresh_inner(&self) -> RefreshOutcome {
		let request = RequestDescriptor::post(self.refresh_path.as_str());
		let url = match request.url(&self.base_url) {
			Ok(url) => url,
			Err(err) => return RefreshOutcome::Failed(err.to_string()),
		};
		let response = match self.transport.execute(url, &request).await {
			Ok(response) => response,
			Err(err) => return RefreshOutcome::Failed(format!("refresh call failed: {err}")),
		};

		if !response.is_success() {
			return RefreshOutcome::Failed(format!(
				"refresh endpoint responded with status {}",
				response.status
			));
		}

		match response.json::<AccessTokenResponse>() {
			Ok(body) => match body.into_credential() {
				Some(credential) => RefreshOutcome::Renewed(credential),
				None => RefreshOutcome::Failed("refresh response carried no access token".into()),
			},
			Err(err) => RefreshOutcome::Failed(err.to_string()),
		}
	}

	/// Clears the session, signals re-authentication, and builds the caller-facing error.
	pub fn terminate(&self, path: &str, reason: impl Into<String>) -> Error {
		let reason = reason.into();

		self.session.clear();
		self.metrics.record(RecoveryEvent::Terminated);
		obs::warn_session_terminated(path, &reason);
		self.listener.reauthentication_required(&self.login_route);

		Error::RefreshFailed { reason }
	}
}
impl<T> Debug for ResponseRecoveryHandler<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ResponseRecoveryHandler")
			.field("base_url", &self.base_url.as_str())
			.field("refresh_path", &self.refresh_path)
			.field("login_route", &self.login_route)
			.field("authenticated", &self.session.is_authenticated())
			.finish()
	}
}
