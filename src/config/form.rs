// self
use crate::_prelude::*;

/// Key inside [`Captcha::options`] that holds the server-side verification secret.
pub const CAPTCHA_SECRET_KEY: &str = "secret";

/// Login form behavior.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Form {
	/// Identifier input configuration.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<UsernameField>,
	/// Password input configuration.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<PasswordField>,
	/// Challenge shown before credentials are accepted.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub captcha: Option<Captcha>,
	/// Link to the password recovery page.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub forgot_password_link: Option<String>,
	/// Link to the registration page.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub register_link: Option<String>,
	/// Link to the terms of service.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub terms_of_service_link: Option<String>,
	/// Link to the privacy policy.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub privacy_policy_link: Option<String>,
	/// Show the "remember me" toggle.
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub remember_me: bool,
}

/// Identifier input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsernameField {
	/// Placeholder text.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub placeholder: Option<String>,
	/// Account fields the identifier is matched against (`email`, `mobile`, ...).
	pub fields: Vec<String>,
}

/// Password input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordField {
	/// Placeholder text.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub placeholder: Option<String>,
}

/// Challenge configuration.
///
/// `options` is an open, provider-specific mapping. Only [`CAPTCHA_SECRET_KEY`] is treated as
/// confidential.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Captcha {
	/// Challenge provider name (`image`, `turnstile`, ...).
	pub provider: String,
	/// Provider-specific options.
	pub options: BTreeMap<String, serde_json::Value>,
}
impl Captcha {
	/// Copy of the options without the secret key.
	pub fn public_options(&self) -> BTreeMap<String, serde_json::Value> {
		self.options
			.iter()
			.filter(|(key, _)| key.as_str() != CAPTCHA_SECRET_KEY)
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect()
	}
}
