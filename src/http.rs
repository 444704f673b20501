//! Framework-agnostic handlers for the sign-in HTTP surface.
//!
//! Routing stays with the host server. These handlers take already-extracted query
//! parameters and return a status code plus JSON body, so any framework can mount:
//!
//! - `GET /signin?locale=<tag>` → [`signin`]
//! - `GET /signin/oauth/{provider}/authorize?locale=&redirect_uri=&state=` → [`authorize`]

// self
use crate::{
	_prelude::*,
	dispatch::{AuthorizationDispatcher, AuthorizationParams},
	store::ConfigStore,
};

const NOT_CONFIGURED: &str = "not_configured";
const NOT_CONFIGURED_MESSAGE: &str = "Sign-in is not configured";

/// Query parameters accepted by the sign-in configuration endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SigninQuery {
	/// Requested locale tag.
	pub locale: Option<String>,
}

/// Query parameters accepted by the authorization endpoint.
pub type AuthorizeQuery = AuthorizationParams;

/// OAuth 2.0 error body (`{"error": ..., "error_description": ...}`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthErrorBody {
	/// Error code.
	pub error: String,
	/// Human-readable, pre-composed description.
	pub error_description: String,
}
impl From<&Error> for OAuthErrorBody {
	fn from(e: &Error) -> Self {
		let error_description = match e {
			// Load failures may mention file paths; never surface them.
			Error::Load(_) => "Sign-in configuration is unavailable".to_owned(),
			_ => e.to_string(),
		};

		Self { error: e.oauth_code().to_owned(), error_description }
	}
}

/// Successful authorization response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizeBody {
	/// URL the user agent must be sent to.
	pub authorization_url: String,
	/// State embedded in the URL.
	pub state: String,
}

/// Status code plus JSON body, ready for any HTTP framework to write.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// JSON response body.
	pub body: serde_json::Value,
}
impl ApiResponse {
	fn json<T>(status: u16, body: &T) -> Self
	where
		T: Serialize,
	{
		match serde_json::to_value(body) {
			Ok(body) => Self { status, body },
			Err(e) => {
				tracing::error!(error = %e, "Failed to serialize response body.");

				Self {
					status: 500,
					body: serde_json::json!({
						"error": "server_error",
						"error_description": "Failed to encode response",
					}),
				}
			},
		}
	}

	fn error(e: &Error) -> Self {
		let body = OAuthErrorBody::from(e);

		Self {
			status: e.status(),
			body: serde_json::json!({
				"error": body.error,
				"error_description": body.error_description,
			}),
		}
	}

	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// `GET /signin`: the public configuration for the requested locale.
///
/// Unknown or missing locales fall back to the default. When nothing is configured the
/// response is `404 not_configured`; the full configuration is never returned.
pub fn signin(store: &ConfigStore, query: SigninQuery) -> ApiResponse {
	match store.public_config(query.locale.as_deref().unwrap_or_default()) {
		Some(config) => ApiResponse::json(200, &config),
		None => ApiResponse {
			status: 404,
			body: serde_json::json!({
				"error": NOT_CONFIGURED,
				"error_description": NOT_CONFIGURED_MESSAGE,
			}),
		},
	}
}

/// `GET /signin/oauth/{provider}/authorize`: the authorization URL for `provider`.
pub fn authorize(
	dispatcher: &AuthorizationDispatcher<'_>,
	provider: &str,
	query: AuthorizeQuery,
) -> ApiResponse {
	match dispatcher.authorize(provider, query) {
		Ok(request) => ApiResponse::json(
			200,
			&AuthorizeBody { authorization_url: request.url.into(), state: request.state },
		),
		Err(e) => ApiResponse::error(&e),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn error_body_uses_fixed_messages() {
		let body = OAuthErrorBody::from(&Error::ProviderNotFound { id: "nonexistent".into() });

		assert_eq!(body.error, "invalid_request");
		assert_eq!(body.error_description, "OAuth provider 'nonexistent' not found");

		let body = OAuthErrorBody::from(&Error::Load(LoadError::UnknownDefault {
			locale: "/etc/secret/path".into(),
		}));

		assert!(!body.error_description.contains("/etc"));
	}

	#[test]
	fn query_structs_deserialize_from_partial_maps() {
		let query: AuthorizeQuery = serde_json::from_value(serde_json::json!({ "state": "abc" }))
			.expect("Partial query should deserialize.");

		assert_eq!(query.state.as_deref(), Some("abc"));
		assert!(query.redirect_uri.is_none());

		let query: SigninQuery =
			serde_json::from_value(serde_json::json!({})).expect("Empty query should deserialize.");

		assert!(query.locale.is_none());
	}

	#[test]
	fn empty_store_reports_not_configured() {
		let response = signin(&ConfigStore::new(), SigninQuery::default());

		assert_eq!(response.status, 404);
		assert_eq!(response.body["error"], "not_configured");
	}
}
