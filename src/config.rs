//! Client configuration: API base URL and the per-request deadline.

// self
use crate::{_prelude::*, error::ConfigError};

const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Errors raised while constructing or validating a [`ClientConfig`].
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ClientConfigError {
	/// Base URL must use HTTP or HTTPS.
	#[error("The base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// URL that failed validation.
		url: String,
	},
	/// Base URL cannot have relative paths joined onto it (e.g. `mailto:`).
	#[error("The base URL cannot be used as a base: {url}.")]
	CannotBeBase {
		/// URL that failed validation.
		url: String,
	},
	/// Deadline must be positive.
	#[error("The request timeout must be greater than zero.")]
	ZeroTimeout,
}

/// Validated configuration shared by every request issued through a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClientConfig", into = "RawClientConfig")]
pub struct ClientConfig {
	/// Origin (and optional path prefix) that relative targets are joined onto.
	pub base_url: Url,
	/// Deadline for one logical request, both attempts included, when the caller supplies no
	/// cancellation token.
	pub timeout: Duration,
}
impl ClientConfig {
	/// Deadline applied when none is configured.
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(DEFAULT_TIMEOUT_MS);

	/// Creates a new builder for the provided base URL.
	pub fn builder(base_url: Url) -> ClientConfigBuilder {
		ClientConfigBuilder::new(base_url)
	}

	/// Resolves a request target: absolute `http(s)` URLs pass through, everything else is
	/// joined onto [`ClientConfig::base_url`].
	pub fn resolve(&self, target: &str) -> Result<Url, ConfigError> {
		let resolved = match Url::parse(target) {
			Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
			Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => self.base_url.join(target),
			Err(e) => Err(e),
		};

		resolved.map_err(|source| ConfigError::InvalidTarget { target: target.to_owned(), source })
	}

	fn validate(&self) -> Result<(), ClientConfigError> {
		if !matches!(self.base_url.scheme(), "http" | "https") {
			return Err(ClientConfigError::UnsupportedScheme { url: self.base_url.to_string() });
		}
		if self.base_url.cannot_be_a_base() {
			return Err(ClientConfigError::CannotBeBase { url: self.base_url.to_string() });
		}
		if self.timeout.is_zero() {
			return Err(ClientConfigError::ZeroTimeout);
		}

		Ok(())
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Base URL for relative request targets.
	pub base_url: Url,
	/// Per-request deadline.
	pub timeout: Duration,
}
impl ClientConfigBuilder {
	/// Creates a builder seeded with the base URL and the default deadline.
	pub fn new(base_url: Url) -> Self {
		Self { base_url, timeout: ClientConfig::DEFAULT_TIMEOUT }
	}

	/// Overrides the per-request deadline.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let config = ClientConfig { base_url: self.base_url, timeout: self.timeout };

		config.validate()?;

		Ok(config)
	}
}

#[derive(Serialize, Deserialize)]
struct RawClientConfig {
	base_url: Url,
	#[serde(default = "default_timeout_ms")]
	timeout_ms: u64,
}
impl TryFrom<RawClientConfig> for ClientConfig {
	type Error = ClientConfigError;

	fn try_from(raw: RawClientConfig) -> Result<Self, Self::Error> {
		ClientConfig::builder(raw.base_url).timeout(Duration::from_millis(raw.timeout_ms)).build()
	}
}
impl From<ClientConfig> for RawClientConfig {
	fn from(config: ClientConfig) -> Self {
		Self {
			base_url: config.base_url,
			timeout_ms: u64::try_from(config.timeout.as_millis()).unwrap_or(u64::MAX),
		}
	}
}

fn default_timeout_ms() -> u64 {
	DEFAULT_TIMEOUT_MS
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse test URL.")
	}

	#[test]
	fn builder_applies_default_timeout_and_validates() {
		let config = ClientConfig::builder(url("https://erp.example.com"))
			.build()
			.expect("HTTPS base URL should be accepted.");

		assert_eq!(config.timeout, Duration::from_secs(15));
		assert!(matches!(
			ClientConfig::builder(url("ftp://erp.example.com")).build(),
			Err(ClientConfigError::UnsupportedScheme { .. })
		));
		assert_eq!(
			ClientConfig::builder(url("https://erp.example.com")).timeout(Duration::ZERO).build(),
			Err(ClientConfigError::ZeroTimeout)
		);
	}

	#[test]
	fn resolve_joins_paths_and_keeps_absolute_urls() {
		let config = ClientConfig::builder(url("https://erp.example.com/app/"))
			.build()
			.expect("Base URL should be accepted.");

		assert_eq!(
			config.resolve("/api/items?page=2").expect("Path should resolve.").as_str(),
			"https://erp.example.com/api/items?page=2"
		);
		assert_eq!(
			config.resolve("reports").expect("Relative path should resolve.").as_str(),
			"https://erp.example.com/app/reports"
		);
		assert_eq!(
			config.resolve("http://other.example.com/x").expect("URL should pass.").as_str(),
			"http://other.example.com/x"
		);
	}

	#[test]
	fn serde_uses_millisecond_timeout_with_default() {
		let config: ClientConfig =
			serde_json::from_str(r#"{"base_url":"https://erp.example.com/"}"#)
				.expect("Config without timeout should deserialize.");

		assert_eq!(config.timeout, ClientConfig::DEFAULT_TIMEOUT);

		let config: ClientConfig =
			serde_json::from_str(r#"{"base_url":"https://erp.example.com/","timeout_ms":500}"#)
				.expect("Config with timeout should deserialize.");

		assert_eq!(config.timeout, Duration::from_millis(500));
		assert!(
			serde_json::from_str::<ClientConfig>(r#"{"base_url":"https://e.com/","timeout_ms":0}"#)
				.is_err()
		);
	}
}
