//! Resolver-level error types shared by loading, dispatch, and the HTTP adapter.

// self
use crate::_prelude::*;

/// Resolver-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// OAuth error code reported for every request-path failure.
pub const INVALID_REQUEST: &str = "invalid_request";

/// Canonical error exposed by public APIs.
///
/// Request-path variants render fixed, pre-composed messages only; they never carry
/// configuration content or the name of the check that failed.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Configuration source could not be loaded.
	#[error(transparent)]
	Load(#[from] LoadError),

	/// No provider with the requested identifier exists in the canonical registry.
	#[error("OAuth provider '{id}' not found")]
	ProviderNotFound {
		/// Identifier supplied by the caller.
		id: String,
	},
	/// Provider exists but lacks a client ID, a resolvable secret, or endpoints.
	#[error("Provider configuration is incomplete")]
	ProviderIncomplete {
		/// Identifier of the misconfigured provider, kept for operator logs only.
		provider: String,
	},
	/// Caller-supplied redirect URI is not an absolute http(s) URL.
	#[error("Invalid redirect_uri")]
	InvalidRedirectUri,
}
impl Error {
	/// HTTP status code the error maps to at the network edge.
	pub fn status(&self) -> u16 {
		match self {
			Error::Load(_) => 500,
			Error::ProviderNotFound { .. } => 404,
			Error::ProviderIncomplete { .. } => 500,
			Error::InvalidRedirectUri => 400,
		}
	}

	/// OAuth 2.0 `error` code reported alongside the message.
	///
	/// Incomplete providers are an operator problem but are still reported as
	/// `invalid_request` so callers cannot tell which internal check failed.
	pub fn oauth_code(&self) -> &'static str {
		match self {
			Error::Load(_) => "server_error",
			Error::ProviderNotFound { .. }
			| Error::ProviderIncomplete { .. }
			| Error::InvalidRedirectUri => INVALID_REQUEST,
		}
	}
}

/// Failures raised while reading, substituting, or parsing a configuration source.
///
/// A failed load never replaces the generation that is currently published.
#[derive(Debug, ThisError)]
pub enum LoadError {
	/// Source document could not be read.
	#[error("Failed to read signin configuration from {origin}.")]
	Read {
		/// File path or label of the failing document.
		origin: String,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Source document is not valid JSON or does not match the configuration model.
	#[error("Failed to parse signin configuration from {origin}.")]
	Parse {
		/// File path or label of the failing document.
		origin: String,
		/// Structured parsing failure carrying the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Document is keyed by an empty locale tag.
	#[error("Signin configuration from {origin} has an empty locale tag.")]
	InvalidLocale {
		/// File path or label of the failing document.
		origin: String,
	},
	/// Two documents normalize to the same locale key.
	#[error("Locale `{locale}` is defined more than once.")]
	DuplicateLocale {
		/// Normalized locale key.
		locale: String,
	},
	/// Explicit default locale has no matching document.
	#[error("Default locale `{locale}` has no signin configuration.")]
	UnknownDefault {
		/// Normalized locale key.
		locale: String,
	},
	/// More than one document declares itself the default.
	#[error("Locales `{first}` and `{second}` are both marked as default.")]
	ConflictingDefaults {
		/// First locale flagged as default.
		first: String,
		/// Second locale flagged as default.
		second: String,
	},
}
impl LoadError {
	/// Wraps an IO failure for the given origin.
	pub fn read(origin: impl Into<String>, source: std::io::Error) -> Self {
		Self::Read { origin: origin.into(), source }
	}

	/// Wraps a JSON failure for the given origin.
	pub fn parse(
		origin: impl Into<String>,
		source: serde_path_to_error::Error<serde_json::Error>,
	) -> Self {
		Self::Parse { origin: origin.into(), source }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_errors_use_fixed_messages_and_codes() {
		let not_found = Error::ProviderNotFound { id: "nonexistent".into() };

		assert_eq!(not_found.to_string(), "OAuth provider 'nonexistent' not found");
		assert_eq!(not_found.status(), 404);
		assert_eq!(not_found.oauth_code(), "invalid_request");

		let incomplete = Error::ProviderIncomplete { provider: "google".into() };

		assert_eq!(incomplete.to_string(), "Provider configuration is incomplete");
		assert!(!incomplete.to_string().contains("google"));
		assert_eq!(incomplete.status(), 500);
		assert_eq!(incomplete.oauth_code(), "invalid_request");
		assert_eq!(Error::InvalidRedirectUri.status(), 400);
	}

	#[test]
	fn load_error_exposes_json_path_as_source() {
		let mut de = serde_json::Deserializer::from_str("{\"title\": 7}");
		let err = serde_path_to_error::deserialize::<_, crate::config::Config>(&mut de)
			.expect_err("Numeric title should fail to deserialize.");
		let load = Error::from(LoadError::parse("en", err));

		assert!(load.to_string().contains("en"));

		let source =
			StdError::source(&load).expect("Parse error should expose the path-aware source.");

		assert!(source.to_string().contains("title"));
	}
}
