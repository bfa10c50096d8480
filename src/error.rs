//! Client-level error types shared across the transport, recovery, and session layers.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Only [`Error::AuthExpired`] is ever recovered locally, and only once per request; every
/// other variant reaches the calling collaborator unchanged.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// No response was obtained (connectivity, DNS, TLS).
	#[error(transparent)]
	Network(#[from] TransportError),
	/// Response body could not be decoded into the requested type.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Backend answered with a non-success status other than an authentication failure.
	#[error("Server responded with status {status}: {message}")]
	Server {
		/// HTTP status code.
		status: u16,
		/// Backend-supplied message (`message`, then `error`, then the status reason).
		message: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Authentication failure observed on a request that has not been recovered yet.
	#[error("Authentication expired (status {status}).")]
	AuthExpired {
		/// HTTP status code that triggered the classification.
		status: u16,
	},
	/// Session recovery failed; the session was cleared and the user must sign in again.
	#[error("Session expired and could not be renewed: {reason}.")]
	RefreshFailed {
		/// Human-readable reason describing why recovery terminated.
		reason: String,
	},
	/// Backend issued a credential that cannot be used (missing or empty access token).
	#[error("Backend issued an unusable access token.")]
	InvalidCredential,
}
impl Error {
	/// Returns `true` when the application must navigate to re-authentication.
	pub fn requires_reauthentication(&self) -> bool {
		matches!(self, Self::RefreshFailed { .. })
	}

	/// HTTP status attached to the failure, when a response was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Server { status, .. } | Self::AuthExpired { status } => Some(*status),
			Self::Decode(err) => err.status,
			_ => None,
		}
	}
}

/// Configuration and request-construction failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed or joined.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than HTTP(S) or cannot serve as a base.
	#[error("Base URL must be an absolute http(s) URL: {url}.")]
	UnsupportedScheme {
		/// Offending URL.
		url: String,
	},
	/// A header name or value cannot be sent over HTTP.
	#[error("Header `{name}` is invalid.")]
	InvalidHeader {
		/// Header name as supplied by the caller.
		name: String,
	},
	/// Transaction amount is not a positive decimal.
	#[error("Amount `{value}` must be a positive decimal.")]
	InvalidAmount {
		/// Amount as supplied by the caller.
		value: String,
	},
	/// Identifier cannot be embedded into a request path.
	#[error("Path segment `{value}` may only contain ASCII letters, digits, `-` and `_`.")]
	InvalidPathSegment {
		/// Segment as supplied by the caller.
		value: String,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	BodySerialize(#[source] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the ledger backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the ledger backend.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Response body did not match the expected shape.
#[derive(Debug, ThisError)]
#[error("Response body is malformed at `{}`.", .source.path())]
pub struct DecodeError {
	/// Structured parsing failure including the JSON path.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
	/// HTTP status code of the decoded response, when available.
	pub status: Option<u16>,
}

/// Extracts a user-presentable message from an error body.
///
/// Precedence follows the backend's conventions: `message`, then `error`, then `fallback`.
pub(crate) fn server_message(body: &[u8], fallback: &str) -> String {
	serde_json::from_slice::<JsonValue>(body)
		.ok()
		.and_then(|value| {
			["message", "error"].into_iter().find_map(|field| {
				value.get(field).and_then(JsonValue::as_str).map(str::to_owned)
			})
		})
		.filter(|message| !message.trim().is_empty())
		.unwrap_or_else(|| fallback.to_owned())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn server_message_prefers_message_then_error() {
		assert_eq!(
			server_message(br#"{"message":"Insufficient funds","error":"Bad Request"}"#, "x"),
			"Insufficient funds"
		);
		assert_eq!(server_message(br#"{"error":"Bad Request"}"#, "x"), "Bad Request");
		assert_eq!(server_message(b"<html>oops</html>", "Internal Server Error"), "Internal Server Error");
		assert_eq!(server_message(br#"{"message":"  "}"#, "Conflict"), "Conflict");
	}

	#[test]
	fn only_refresh_failures_require_reauthentication() {
		let refresh = Error::RefreshFailed { reason: "refresh rejected".into() };
		let server = Error::Server { status: 500, message: "boom".into(), retry_after: None };

		assert!(refresh.requires_reauthentication());
		assert!(!server.requires_reauthentication());
		assert!(!Error::AuthExpired { status: 401 }.requires_reauthentication());
		assert_eq!(server.status(), Some(500));
		assert_eq!(refresh.status(), None);
	}

	#[test]
	fn decode_error_reports_json_path() {
		#[derive(Debug, Deserialize)]
		#[allow(dead_code)]
		struct Payload {
			#[serde(rename = "accessToken")]
			access_token: String,
		}

		let de = &mut serde_json::Deserializer::from_str(r#"{"accessToken":42}"#);
		let source = serde_path_to_error::deserialize::<_, Payload>(de)
			.expect_err("Numeric token should fail to deserialize.");
		let err = Error::from(DecodeError { source, status: Some(200) });

		assert!(err.to_string().contains("accessToken"));
		assert_eq!(err.status(), Some(200));
	}
}
