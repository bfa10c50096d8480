//! The collaborator-facing call surface.
//!
//! [`HttpClient`] wires the [`RequestAuthenticator`] before send and the
//! [`ResponseRecoveryHandler`] after receive, then exposes verb-shaped operations that resolve
//! to decoded payloads or a structured [`Error`]. Page-level collaborators never see refresh
//! or retry mechanics.

pub mod diagnostics;
pub mod lifecycle;
pub mod transactions;

pub use diagnostics::*;
pub use transactions::*;

// self
use crate::{
	_prelude::*,
	auth::{IdempotencyKey, IdempotencyKeyGenerator, RandomKeyGenerator},
	authenticator::{BearerAuthenticator, RequestAuthenticator},
	config::ClientConfig,
	http::{ApiResponse, ApiTransport, RequestDescriptor},
	obs::{self, CallKind, CallOutcome, CallSpan},
	recovery::{ReauthFlag, ReauthListener, RecoveryMetrics, ResponseRecoveryHandler},
	session::SessionStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestHttpClient = HttpClient<ReqwestTransport>;

/// Per-call options layered on top of a verb.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
	/// Extra headers; later entries replace earlier ones with the same name.
	pub headers: Vec<(String, String)>,
	/// Idempotency key for a user-initiated mutating submission.
	pub idempotency_key: Option<IdempotencyKey>,
}
impl RequestOptions {
	/// Adds a header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Attaches an idempotency key.
	pub fn idempotency_key(mut self, key: IdempotencyKey) -> Self {
		self.idempotency_key = Some(key);

		self
	}

	fn apply(self, request: RequestDescriptor) -> RequestDescriptor {
		let request = request.with_headers(self.headers);

		match &self.idempotency_key {
			Some(key) => request.with_idempotency_key(key),
			None => request,
		}
	}
}

/// Authenticated API client shared by every page-level collaborator.
pub struct HttpClient<T>
where
	T: ?Sized + ApiTransport,
{
	config: ClientConfig,
	keys: Arc<dyn IdempotencyKeyGenerator>,
	recovery: ResponseRecoveryHandler<T>,
}
impl<T> HttpClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates a client over the caller-provided transport and session store.
	///
	/// Defaults: [`BearerAuthenticator`], [`RandomKeyGenerator`], and a [`ReauthFlag`] listener.
	pub fn with_transport(
		config: ClientConfig,
		session: Arc<dyn SessionStore>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		let recovery = ResponseRecoveryHandler::new(
			&config,
			transport.into(),
			session,
			Arc::new(BearerAuthenticator),
			Arc::new(ReauthFlag::default()),
		);

		Self { config, keys: Arc::new(RandomKeyGenerator), recovery }
	}

	/// Replaces the listener notified when the session terminates.
	pub fn with_reauth_listener(mut self, listener: Arc<dyn ReauthListener>) -> Self {
		self.recovery = self.recovery.with_listener(listener);

		self
	}

	/// Replaces the authenticator applied before every send.
	pub fn with_authenticator(mut self, authenticator: Arc<dyn RequestAuthenticator>) -> Self {
		self.recovery = self.recovery.with_authenticator(authenticator);

		self
	}

	/// Replaces the idempotency key source used by typed submissions.
	pub fn with_key_generator(mut self, keys: Arc<dyn IdempotencyKeyGenerator>) -> Self {
		self.keys = keys;

		self
	}

	/// Active configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Session store backing this client.
	pub fn session(&self) -> &Arc<dyn SessionStore> {
		self.recovery.session()
	}

	/// Recovery counters (refresh attempts, successes, failures, terminations).
	pub fn recovery_metrics(&self) -> &Arc<RecoveryMetrics> {
		self.recovery.metrics()
	}

	/// Whether a credential is currently held.
	pub fn is_authenticated(&self) -> bool {
		self.session().is_authenticated()
	}

	/// Generates a fresh key for one user-initiated submission.
	pub fn idempotency_key(&self) -> IdempotencyKey {
		self.keys.generate()
	}

	/// Sends `request` through authentication + recovery and returns the successful response.
	///
	/// Non-success statuses become [`Error::Server`]; failed recovery becomes
	/// [`Error::RefreshFailed`].
	pub async fn execute(&self, request: RequestDescriptor) -> Result<ApiResponse> {
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, "execute");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				successful(self.recovery.send(request).await?)
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	/// Executes `request` and decodes the JSON payload.
	pub async fn request<R>(&self, request: RequestDescriptor) -> Result<R>
	where
		R: DeserializeOwned,
	{
		Ok(self.execute(request).await?.json()?)
	}

	/// `GET path`.
	pub async fn get<R>(&self, path: &str) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.get_with(path, RequestOptions::default()).await
	}

	/// `GET path` with options.
	pub async fn get_with<R>(&self, path: &str, options: RequestOptions) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.request(options.apply(RequestDescriptor::get(path))).await
	}

	/// `POST path` with a JSON body.
	pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.post_with(path, body, RequestOptions::default()).await
	}

	/// `POST path` with a JSON body and options.
	pub async fn post_with<B, R>(&self, path: &str, body: &B, options: RequestOptions) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.request(options.apply(RequestDescriptor::post(path).with_json(body)?)).await
	}

	/// `PUT path` with a JSON body.
	pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.put_with(path, body, RequestOptions::default()).await
	}

	/// `PUT path` with a JSON body and options.
	pub async fn put_with<B, R>(&self, path: &str, body: &B, options: RequestOptions) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.request(options.apply(RequestDescriptor::put(path).with_json(body)?)).await
	}

	/// `DELETE path`.
	pub async fn delete<R>(&self, path: &str) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.delete_with(path, RequestOptions::default()).await
	}

	/// `DELETE path` with options.
	pub async fn delete_with<R>(&self, path: &str, options: RequestOptions) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.request(options.apply(RequestDescriptor::delete(path))).await
	}
}
#[cfg(feature = "reqwest")]
impl HttpClient<ReqwestTransport> {
	/// Creates a client that provisions its own cookie-aware reqwest transport.
	pub fn new(config: ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self> {
		Ok(Self::with_transport(config, session, ReqwestTransport::new()?))
	}
}
impl<T> Debug for HttpClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("HttpClient")
			.field("config", &self.config)
			.field("recovery", &self.recovery)
			.finish()
	}
}

/// Converts non-success responses into [`Error::Server`].
pub(crate) fn successful(response: ApiResponse) -> Result<ApiResponse> {
	if response.is_success() { Ok(response) } else { Err(response.into_server_error()) }
}
