// self
use crate::{_prelude::*, config::SecretString};

/// One third-party identity provider.
///
/// `id`, `title`, `logo`, `color`, and `text_color` are display fields. Everything else is
/// credential or dispatch data that must never cross the public boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Provider {
	/// Stable provider identifier used in authorization routes.
	pub id: String,
	/// Button label.
	pub title: String,
	/// Button logo URL or asset path.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub logo: String,
	/// Button background color.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub color: String,
	/// Button text color.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub text_color: String,

	/// OAuth client identifier.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub client_id: String,
	/// Literal OAuth client secret.
	#[serde(skip_serializing_if = "SecretString::is_empty")]
	pub client_secret: SecretString,
	/// Strategy deriving the client secret when no literal secret is configured.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub client_secret_generator: Option<ClientSecretGenerator>,
	/// Requested scopes, in order.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub scopes: Vec<String>,
	/// Character joining scopes in the `scope` parameter; a space when unset.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scope_delimiter: Option<char>,
	/// Value for the `response_mode` authorization parameter (`form_post`, `query`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub response_mode: Option<String>,
	/// Attach a PKCE S256 challenge to authorization requests.
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub pkce: bool,
	/// Provider-specific default callback URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub redirect_uri: Option<String>,
	/// OAuth endpoints and fixed authorization parameters.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub endpoints: Option<Endpoints>,
	/// Claim name to local account field translation.
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	pub mapping: BTreeMap<String, String>,
}
impl Provider {
	/// Character used to join scopes.
	pub fn scope_delimiter(&self) -> char {
		self.scope_delimiter.unwrap_or(' ')
	}

	/// True when a literal secret or a usable secret generator is configured.
	pub fn has_resolvable_secret(&self) -> bool {
		!self.client_secret.is_empty()
			|| self.client_secret_generator.as_ref().is_some_and(ClientSecretGenerator::is_usable)
	}
}

/// OAuth endpoint set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
	/// Authorization endpoint the user agent is redirected to.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub authorization: Option<String>,
	/// Token endpoint used by the code exchange.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token: Option<String>,
	/// User info endpoint.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_info: Option<String>,
	/// JWKS endpoint for ID token verification.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub jwks: Option<String>,
	/// Fixed parameters appended to every authorization URL (`access_type`, `prompt`).
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	pub params: BTreeMap<String, String>,
}
impl Endpoints {
	/// Authorization endpoint when configured and non-blank.
	pub fn authorization(&self) -> Option<&str> {
		self.authorization.as_deref().map(str::trim).filter(|s| !s.is_empty())
	}
}

/// Closed set of client secret derivation strategies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientSecretGenerator {
	/// Sign in with Apple: an ES256 JWT signed with the team's private key.
	#[serde(alias = "apple")]
	AppleJwt {
		/// Apple developer team identifier (`iss`).
		team_id: String,
		/// Key identifier (`kid`).
		key_id: String,
		/// Path to, or inline PEM of, the signing key.
		private_key: SecretString,
		/// Lifetime of generated secrets (`"180d"`).
		#[serde(default, skip_serializing_if = "Option::is_none")]
		expires_in: Option<String>,
	},
}
impl ClientSecretGenerator {
	/// Stable label of the strategy.
	pub fn kind(&self) -> &'static str {
		match self {
			ClientSecretGenerator::AppleJwt { .. } => "apple_jwt",
		}
	}

	/// True when every input the strategy needs is present.
	pub fn is_usable(&self) -> bool {
		match self {
			ClientSecretGenerator::AppleJwt { team_id, key_id, private_key, .. } =>
				!team_id.is_empty() && !key_id.is_empty() && !private_key.is_empty(),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_generator_counts_as_resolvable_secret() {
		let provider: Provider = serde_json::from_value(serde_json::json!({
			"id": "apple",
			"client_id": "com.example.web",
			"client_secret_generator": {
				"type": "apple",
				"team_id": "TEAM",
				"key_id": "KEY",
				"private_key": "apple.p8"
			}
		}))
		.expect("Apple provider should deserialize.");
		let generator =
			provider.client_secret_generator.as_ref().expect("Generator should be present.");

		assert_eq!(generator.kind(), "apple_jwt");
		assert!(provider.client_secret.is_empty());
		assert!(provider.has_resolvable_secret());
	}

	#[test]
	fn empty_generator_inputs_are_not_resolvable() {
		let provider = Provider {
			id: "apple".into(),
			client_secret_generator: Some(ClientSecretGenerator::AppleJwt {
				team_id: "TEAM".into(),
				key_id: String::new(),
				private_key: SecretString::new("apple.p8"),
				expires_in: None,
			}),
			..Default::default()
		};

		assert!(!provider.has_resolvable_secret());
	}

	#[test]
	fn unknown_generator_type_is_rejected() {
		let result = serde_json::from_value::<Provider>(serde_json::json!({
			"id": "x",
			"client_secret_generator": { "type": "custom_script" }
		}));

		assert!(result.is_err());
	}

	#[test]
	fn blank_authorization_endpoint_is_treated_as_missing() {
		let endpoints = Endpoints { authorization: Some("  ".into()), ..Default::default() };

		assert!(endpoints.authorization().is_none());
	}
}
