//! Sign-in configuration model for a single locale.
//!
//! Documents deserialize into [`Config`] after placeholder substitution. Every section is
//! optional so partially configured locales still load; the redaction engine derives the
//! public view from the same types.

/// Login form and captcha settings.
pub mod form;
/// Third-party identity provider entries.
pub mod provider;
pub mod secret;

pub use form::*;
pub use provider::*;
pub use secret::*;

// self
use crate::_prelude::*;

/// Root sign-in configuration for one locale.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Page title.
	pub title: String,
	/// Optional subtitle shown under the title.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Where the front-end navigates after a successful sign-in.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub success_url: Option<String>,
	/// Where the front-end navigates after a failed sign-in.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub failure_url: Option<String>,
	/// Marks this document as the default locale.
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub default: bool,
	/// Login form behavior.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub form: Option<Form>,
	/// Session lifetime hints displayed by the front-end.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token: Option<TokenPolicy>,
	/// Third-party identity providers.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub third_party: Option<ThirdParty>,
}
impl Config {
	/// Providers declared by this locale, or an empty slice.
	pub fn providers(&self) -> &[Provider] {
		self.third_party.as_ref().map(|tp| tp.providers.as_slice()).unwrap_or_default()
	}
}

/// Session lifetime hints, expressed as display strings (`"1h"`, `"30d"`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenPolicy {
	/// Lifetime of a regular session.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub expires_in: Option<String>,
	/// Lifetime of a "remember me" session.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub remember_me_expires_in: Option<String>,
}

/// Third-party sign-in section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThirdParty {
	/// Automatic account registration for first-time third-party users.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub register: Option<AutoRegister>,
	/// Shared callback template; `{provider}` is replaced by the provider ID.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub redirect_uri: Option<String>,
	/// Configured providers, in display order.
	pub providers: Vec<Provider>,
}

/// Automatic registration policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoRegister {
	/// Create accounts for unknown third-party users.
	pub auto: bool,
	/// Role assigned to automatically created accounts.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn minimal_document_deserializes_with_defaults() {
		let config: Config = serde_json::from_str("{\"title\":\"Sign in\"}")
			.expect("Minimal document should deserialize.");

		assert_eq!(config.title, "Sign in");
		assert!(config.form.is_none());
		assert!(config.providers().is_empty());
		assert!(!config.default);
	}

	#[test]
	fn full_document_deserializes() {
		let config: Config = serde_json::from_value(serde_json::json!({
			"title": "Sign in",
			"default": true,
			"form": {
				"username": { "placeholder": "Email", "fields": ["email", "mobile"] },
				"captcha": { "provider": "cloudflare", "options": { "sitekey": "k", "secret": "s" } },
				"remember_me": true
			},
			"token": { "expires_in": "1h" },
			"third_party": {
				"register": { "auto": true, "role": "user" },
				"providers": [{
					"id": "google",
					"title": "Google",
					"client_id": "cid",
					"client_secret": "secret",
					"scopes": ["openid", "email"],
					"endpoints": { "authorization": "https://accounts.google.com/o/oauth2/v2/auth" },
					"mapping": { "sub": "id" }
				}]
			}
		}))
		.expect("Full document should deserialize.");

		assert!(config.default);

		let form = config.form.as_ref().expect("Form section should be present.");

		assert_eq!(
			form.username.as_ref().map(|u| u.fields.clone()),
			Some(vec!["email".to_owned(), "mobile".to_owned()])
		);
		assert!(form.remember_me);

		let provider = &config.providers()[0];

		assert_eq!(provider.id, "google");
		assert_eq!(provider.client_secret.expose(), "secret");
		assert_eq!(provider.mapping.get("sub").map(String::as_str), Some("id"));
	}
}
