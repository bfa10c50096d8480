//! Immutable outgoing request descriptors.

// self
use crate::{
	_prelude::*,
	auth::{IDEMPOTENCY_KEY_HEADER, IdempotencyKey},
	error::ConfigError,
};

/// HTTP verbs used by the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
}
impl Method {
	/// Returns the canonical upper-case verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Payload attached to a request.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
	/// No body.
	#[default]
	Empty,
	/// JSON document sent as `application/json`.
	Json(JsonValue),
	/// Pairs sent as `application/x-www-form-urlencoded`.
	Form(Vec<(String, String)>),
}

/// Description of one logical backend call.
///
/// Descriptors are built once and never mutated in place. Header names are stored lower-cased
/// and looked up case-insensitively. The authentication-retry marker can only move from unset to
/// set, via [`RequestDescriptor::mark_retried`], which yields a new descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
	method: Method,
	path: String,
	headers: BTreeMap<String, String>,
	body: RequestBody,
	auth_retried: bool,
}
impl RequestDescriptor {
	/// Creates a descriptor for `method` against `path` (relative to the configured base URL).
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			headers: BTreeMap::new(),
			body: RequestBody::Empty,
			auth_retried: false,
		}
	}

	/// Shorthand for a `GET` descriptor.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	/// Shorthand for a `POST` descriptor.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::Post, path)
	}

	/// Shorthand for a `PUT` descriptor.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::Put, path)
	}

	/// Shorthand for a `DELETE` descriptor.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	/// Adds or replaces a header.
	pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
		self.headers.insert(name.as_ref().to_ascii_lowercase(), value.into());

		self
	}

	/// Adds several headers, replacing any with the same name.
	pub fn with_headers<I, K, V>(self, headers: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		headers.into_iter().fold(self, |request, (name, value)| request.with_header(name, value))
	}

	/// Attaches the submission's idempotency key.
	pub fn with_idempotency_key(self, key: &IdempotencyKey) -> Self {
		self.with_header(IDEMPOTENCY_KEY_HEADER, key.as_str())
	}

	/// Serializes `body` as the JSON payload.
	pub fn with_json<T>(mut self, body: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		self.body = RequestBody::Json(serde_json::to_value(body).map_err(ConfigError::BodySerialize)?);

		Ok(self)
	}

	/// Sets an already-built JSON payload.
	pub fn with_json_value(mut self, body: JsonValue) -> Self {
		self.body = RequestBody::Json(body);

		self
	}

	/// Sets a form-encoded payload.
	pub fn with_form<I, K, V>(mut self, pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.body =
			RequestBody::Form(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect());

		self
	}

	/// Returns a copy flagged as already retried for authentication recovery.
	pub fn mark_retried(mut self) -> Self {
		self.auth_retried = true;

		self
	}

	/// Whether this descriptor has already been through authentication recovery.
	pub fn retried(&self) -> bool {
		self.auth_retried
	}

	/// HTTP verb.
	pub fn method(&self) -> Method {
		self.method
	}

	/// Path relative to the base URL, including any query string.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Headers keyed by lower-cased name.
	pub fn headers(&self) -> &BTreeMap<String, String> {
		&self.headers
	}

	/// Case-insensitive header lookup.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
	}

	/// Request payload.
	pub fn body(&self) -> &RequestBody {
		&self.body
	}

	/// Resolves the absolute URL against `base`.
	///
	/// Leading slashes are treated as relative to the base path, so a base of
	/// `https://host/api/` and a path of `/customer/list` yield `https://host/api/customer/list`.
	pub fn url(&self, base: &Url) -> Result<Url> {
		let mut base = base.clone();

		if !base.path().ends_with('/') {
			let path = format!("{}/", base.path());

			base.set_path(&path);
		}

		base.join(self.path.trim_start_matches('/'))
			.map_err(|source| ConfigError::InvalidBaseUrl { source }.into())
	}
}
