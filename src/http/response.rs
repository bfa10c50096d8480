//! Received responses and their classification.

// crates.io
use time::format_description::well_known::Rfc2822;
// self
use crate::{
	_prelude::*,
	error::{DecodeError, server_message},
};

/// Status the backend uses to signal an expired or missing bearer credential.
pub const AUTH_FAILURE_STATUS: u16 = 401;

/// Fully-read HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response headers keyed by lower-cased name.
	pub headers: BTreeMap<String, String>,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Builds a response, lower-casing header names.
	pub fn new(status: u16, headers: BTreeMap<String, String>, body: Vec<u8>) -> Self {
		let headers =
			headers.into_iter().map(|(name, value)| (name.to_ascii_lowercase(), value)).collect();

		Self { status, headers, body }
	}

	/// Builds a response carrying a JSON body.
	pub fn json_body(status: u16, body: &JsonValue) -> Self {
		let headers = BTreeMap::from([("content-type".to_owned(), "application/json".to_owned())]);

		Self::new(status, headers, body.to_string().into_bytes())
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns `true` when the status signals an authentication failure.
	pub fn is_auth_failure(&self) -> bool {
		self.status == AUTH_FAILURE_STATUS
	}

	/// Case-insensitive header lookup.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
	}

	/// Retry-After hint expressed as a relative duration.
	pub fn retry_after(&self) -> Option<Duration> {
		let raw = self.header("retry-after")?.trim();

		if let Ok(secs) = raw.parse::<u32>() {
			return Some(Duration::seconds(secs.into()));
		}
		if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
			let delta = moment - OffsetDateTime::now_utc();

			if delta.is_positive() {
				return Some(delta);
			}
		}

		None
	}

	/// Body as a JSON value.
	///
	/// An empty body is `null`. A body that is not JSON (e.g. `Deposit successful`) is kept as a
	/// JSON string, so acknowledgements in plain text are never lost.
	pub fn payload(&self) -> JsonValue {
		if self.body.iter().all(u8::is_ascii_whitespace) {
			return JsonValue::Null;
		}

		serde_json::from_slice(&self.body)
			.unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(&self.body).into_owned()))
	}

	/// Decodes [`ApiResponse::payload`] into `T`, reporting the failing path on mismatch.
	///
	/// `()` and `Option<T>` targets accept an empty body; [`JsonValue`] and `String` targets
	/// accept plain-text bodies.
	pub fn json<T>(&self) -> Result<T, DecodeError>
	where
		T: DeserializeOwned,
	{
		serde_path_to_error::deserialize(self.payload())
			.map_err(|source| DecodeError { source, status: Some(self.status) })
	}

	/// Converts a non-success response into [`Error::Server`].
	pub fn into_server_error(self) -> Error {
		let fallback = format!("Request failed with status code {}", self.status);

		Error::Server {
			status: self.status,
			message: server_message(&self.body, &fallback),
			retry_after: self.retry_after(),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn with_header(name: &str, value: &str) -> ApiResponse {
		ApiResponse::new(503, BTreeMap::from([(name.to_owned(), value.to_owned())]), Vec::new())
	}

	#[test]
	fn retry_after_accepts_seconds_and_dates() {
		assert_eq!(with_header("Retry-After", "30").retry_after(), Some(Duration::seconds(30)));

		let future = (OffsetDateTime::now_utc() + Duration::minutes(5))
			.format(&Rfc2822)
			.expect("Future instant should format as RFC 2822.");
		let hint = with_header("retry-after", &future)
			.retry_after()
			.expect("Future RFC 2822 date should yield a hint.");

		assert!(hint > Duration::minutes(4));
		assert_eq!(with_header("retry-after", "soon").retry_after(), None);
	}

	#[test]
	fn empty_bodies_decode_as_null() {
		let response = ApiResponse::new(204, BTreeMap::new(), Vec::new());

		response.json::<()>().expect("Empty body should decode into unit.");

		assert_eq!(response.json::<Option<JsonValue>>().expect("Empty body should decode."), None);
	}

	#[test]
	fn plain_text_bodies_are_kept_as_strings() {
		let response = ApiResponse::new(200, BTreeMap::new(), b"Deposit successful".to_vec());

		assert_eq!(response.payload(), JsonValue::String("Deposit successful".into()));
		assert_eq!(
			response.json::<String>().expect("Text body should decode into a string."),
			"Deposit successful"
		);

		#[derive(Debug, Deserialize)]
		#[allow(dead_code)]
		struct Booked {
			id: u64,
		}

		let err = response.json::<Booked>().expect_err("Text body cannot become a struct.");

		assert_eq!(err.status, Some(200));
	}

	#[test]
	fn server_errors_carry_backend_message() {
		let response =
			ApiResponse::json_body(422, &serde_json::json!({ "message": "Amount must be positive" }));

		match response.into_server_error() {
			Error::Server { status, message, retry_after } => {
				assert_eq!(status, 422);
				assert_eq!(message, "Amount must be positive");
				assert_eq!(retry_after, None);
			},
			other => panic!("Expected a server error, got {other:?}."),
		}
	}

	#[test]
	fn status_classification() {
		assert!(ApiResponse::new(204, BTreeMap::new(), Vec::new()).is_success());
		assert!(ApiResponse::new(401, BTreeMap::new(), Vec::new()).is_auth_failure());
		assert!(!ApiResponse::new(403, BTreeMap::new(), Vec::new()).is_auth_failure());
	}
}
