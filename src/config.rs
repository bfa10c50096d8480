//! Client configuration: backend origin, session endpoints, and the re-authentication route.

// self
use crate::{_prelude::*, error::ConfigError};

/// Remote origin the console talks to unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "https://ledger-core-backend.onrender.com";
/// Route users are sent to when the session terminates.
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";

/// Paths of the session endpoints, relative to the base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionEndpoints {
	/// Form-encoded credential exchange returning `{ accessToken }`.
	pub login: String,
	/// JSON registration endpoint.
	pub register: String,
	/// Best-effort remote session teardown.
	pub logout: String,
	/// Cookie-authenticated bearer renewal returning `{ accessToken }`.
	pub refresh: String,
}
impl Default for SessionEndpoints {
	fn default() -> Self {
		Self {
			login: "/auth/login".into(),
			register: "/auth/register".into(),
			logout: "/auth/logout".into(),
			refresh: "/auth/refresh".into(),
		}
	}
}

/// Validated client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Absolute http(s) origin (optionally with a path prefix) all paths are resolved against.
	pub base_url: Url,
	/// Session endpoint paths.
	pub endpoints: SessionEndpoints,
	/// Application route users are sent to when the session terminates.
	pub login_route: String,
}
impl ClientConfig {
	/// Returns a builder seeded with the console defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Clone, Debug, Default)]
pub struct ClientConfigBuilder {
	/// Base URL override.
	pub base_url: Option<Url>,
	/// Endpoint overrides.
	pub endpoints: SessionEndpoints,
	/// Re-authentication route override.
	pub login_route: Option<String>,
}
impl ClientConfigBuilder {
	/// Sets the backend origin.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Parses and sets the backend origin.
	pub fn base_url_str(mut self, url: &str) -> Result<Self, ConfigError> {
		self.base_url =
			Some(Url::parse(url).map_err(|source| ConfigError::InvalidBaseUrl { source })?);

		Ok(self)
	}

	/// Replaces the session endpoint paths.
	pub fn endpoints(mut self, endpoints: SessionEndpoints) -> Self {
		self.endpoints = endpoints;

		self
	}

	/// Sets the route reported to the re-authentication listener.
	pub fn login_route(mut self, route: impl Into<String>) -> Self {
		self.login_route = Some(route.into());

		self
	}

	/// Validates the configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(DEFAULT_BASE_URL)
				.map_err(|source| ConfigError::InvalidBaseUrl { source })?,
		};

		if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
			return Err(ConfigError::UnsupportedScheme { url: base_url.to_string() });
		}

		Ok(ClientConfig {
			base_url,
			endpoints: self.endpoints,
			login_route: self.login_route.unwrap_or_else(|| DEFAULT_LOGIN_ROUTE.into()),
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_match_console_backend() {
		let config = ClientConfig::builder().build().expect("Default configuration should be valid.");

		assert_eq!(config.base_url.as_str(), "https://ledger-core-backend.onrender.com/");
		assert_eq!(config.endpoints.refresh, "/auth/refresh");
		assert_eq!(config.login_route, "/login");
	}

	#[test]
	fn rejects_non_http_base_urls() {
		let err = ClientConfig::builder()
			.base_url_str("mailto:ops@example.com")
			.expect("Mailto URL should parse.")
			.build()
			.expect_err("Mailto base should be rejected.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));

		let err = ClientConfig::builder()
			.base_url_str("not a url")
			.expect_err("Garbage should not parse as a base URL.");

		assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
	}

	#[test]
	fn overrides_apply() {
		let config = ClientConfig::builder()
			.base_url_str("http://127.0.0.1:8080/api")
			.expect("Local URL should parse.")
			.login_route("/signin")
			.build()
			.expect("Local configuration should be valid.");

		assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/api");
		assert_eq!(config.login_route, "/signin");
	}
}
