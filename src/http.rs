//! Transport primitives for ledger backend calls.
//!
//! The module exposes [`ApiTransport`] alongside [`RequestDescriptor`] and [`ApiResponse`] so
//! downstream crates can plug in custom HTTP stacks (or scripted doubles) without touching the
//! recovery pipeline. Transports receive requests that are already authenticated; they never
//! consult the session themselves. Non-success statuses come back as [`ApiResponse`] values, so
//! only failures to obtain a response at all are reported as errors.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::{
	Method as ReqwestMethod,
	header::{CONTENT_TYPE, HeaderMap},
	redirect::Policy,
};
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, TransportError};

/// Boxed future returned by [`ApiTransport::execute`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<ApiResponse>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of delivering [`RequestDescriptor`]s.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back every client
/// handle. The transport is also responsible for the ambient credential channel: the refresh
/// call carries no bearer token and relies on whatever cookie state the transport keeps.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` to `url` and resolves once the full response body has been read.
	///
	/// Return [`Error::Network`] when no response was obtained and [`Error::Config`] when the
	/// request could not be constructed. Any received status, including 4xx/5xx, must resolve
	/// to `Ok`.
	fn execute<'a>(&'a self, url: Url, request: &'a RequestDescriptor) -> TransportFuture<'a>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The default client keeps a cookie store, which is how the refresh endpoint receives its
/// ambient credential, and does not follow redirects so authentication failures surface
/// directly instead of as login-page HTML.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds the default cookie-aware transport.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().cookie_store(true).redirect(Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	///
	/// Enable `cookie_store` on custom clients, otherwise refresh calls cannot authenticate.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	fn execute<'a>(&'a self, url: Url, request: &'a RequestDescriptor) -> TransportFuture<'a> {
		Box::pin(send_reqwest(&self.0, url, request))
	}
}

#[cfg(feature = "reqwest")]
async fn send_reqwest(
	client: &ReqwestClient,
	url: Url,
	request: &RequestDescriptor,
) -> Result<ApiResponse> {
	let mut builder = client.request(reqwest_method(request.method()), url);

	for (name, value) in request.headers() {
		builder = builder.header(name.as_str(), value.as_str());
	}

	builder = match request.body() {
		RequestBody::Empty => builder,
		RequestBody::Json(value) => builder
			.header(CONTENT_TYPE, "application/json")
			.body(serde_json::to_vec(value).map_err(ConfigError::BodySerialize)?),
		RequestBody::Form(pairs) => builder.form(pairs),
	};

	let response = builder.send().await.map_err(map_reqwest_error)?;
	let status = response.status().as_u16();
	let headers = collect_headers(response.headers());
	let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

	Ok(ApiResponse::new(status, headers, body))
}

#[cfg(feature = "reqwest")]
fn reqwest_method(method: Method) -> ReqwestMethod {
	match method {
		Method::Get => ReqwestMethod::GET,
		Method::Post => ReqwestMethod::POST,
		Method::Put => ReqwestMethod::PUT,
		Method::Delete => ReqwestMethod::DELETE,
	}
}

#[cfg(feature = "reqwest")]
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
	headers
		.iter()
		.filter_map(|(name, value)| {
			value.to_str().ok().map(|value| (name.as_str().to_owned(), value.to_owned()))
		})
		.collect()
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::from(err).into()
}
