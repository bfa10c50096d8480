//! Bearer credential wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Opaque bearer credential held for the lifetime of a browsing session.
///
/// A credential is never empty; [`Credential::parse`] rejects blank input so stores can rely on
/// every held value being attachable.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);
impl Credential {
	/// Wraps `value` unless it is empty or whitespace-only.
	pub fn parse(value: impl Into<String>) -> Option<Self> {
		let value = value.into();

		if value.trim().is_empty() { None } else { Some(Self(value)) }
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Formats the `Authorization` header value for this credential.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.0)
	}
}
impl AsRef<str> for Credential {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Credential").field(&"<redacted>").finish()
	}
}
impl Display for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Wire shape of the login and refresh responses (`{ "accessToken": ... }`).
#[derive(Clone, Deserialize)]
pub(crate) struct AccessTokenResponse {
	#[serde(rename = "accessToken")]
	pub(crate) access_token: Option<String>,
}
impl AccessTokenResponse {
	pub(crate) fn into_credential(self) -> Option<Credential> {
		self.access_token.and_then(Credential::parse)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn credential_formatters_redact() {
		let credential = Credential::parse("super-secret").expect("Fixture token should parse.");

		assert_eq!(format!("{credential:?}"), "Credential(\"<redacted>\")");
		assert_eq!(format!("{credential}"), "<redacted>");
		assert_eq!(credential.bearer(), "Bearer super-secret");
	}

	#[test]
	fn blank_values_are_rejected() {
		assert!(Credential::parse("").is_none());
		assert!(Credential::parse("   ").is_none());
	}

	#[test]
	fn access_token_response_requires_non_empty_token() {
		let issued: AccessTokenResponse = serde_json::from_str(r#"{"accessToken":"T1"}"#)
			.expect("Token response fixture should deserialize.");
		let blank: AccessTokenResponse = serde_json::from_str(r#"{"accessToken":""}"#)
			.expect("Blank token response fixture should deserialize.");
		let missing: AccessTokenResponse =
			serde_json::from_str("{}").expect("Empty token response fixture should deserialize.");

		assert_eq!(issued.into_credential().map(|c| c.expose().to_owned()), Some("T1".into()));
		assert!(blank.into_credential().is_none());
		assert!(missing.into_credential().is_none());
	}
}
