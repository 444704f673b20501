//! Derives the public view of a sign-in configuration.
//!
//! Redaction is a pure function of the full configuration and is re-run on every public
//! read, so the public view can never drift from the authoritative one.

// self
use crate::config::{Captcha, Config, Form, Provider, ThirdParty};

/// Builds an independent public copy of `full`.
///
/// Providers keep only their display fields, the captcha loses its `secret` option, and
/// third-party registration and callback settings are dropped. Every other display field
/// passes through unchanged.
pub fn to_public(full: &Config) -> Config {
	Config {
		title: full.title.clone(),
		description: full.description.clone(),
		success_url: full.success_url.clone(),
		failure_url: full.failure_url.clone(),
		default: full.default,
		form: full.form.as_ref().map(public_form),
		token: full.token.clone(),
		third_party: full.third_party.as_ref().map(public_third_party),
	}
}

/// Strips every credential and dispatch field from a provider.
pub fn public_provider(provider: &Provider) -> Provider {
	Provider {
		id: provider.id.clone(),
		title: provider.title.clone(),
		logo: provider.logo.clone(),
		color: provider.color.clone(),
		text_color: provider.text_color.clone(),
		..Default::default()
	}
}

fn public_form(form: &Form) -> Form {
	Form {
		captcha: form.captcha.as_ref().map(|captcha| Captcha {
			provider: captcha.provider.clone(),
			options: captcha.public_options(),
		}),
		..form.clone()
	}
}

fn public_third_party(third_party: &ThirdParty) -> ThirdParty {
	ThirdParty {
		register: None,
		redirect_uri: None,
		providers: third_party.providers.iter().map(public_provider).collect(),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::config::{
		AutoRegister, ClientSecretGenerator, Endpoints, SecretString, UsernameField,
	};

	fn full_fixture() -> Config {
		Config {
			title: "Sign in".into(),
			description: Some("Welcome back".into()),
			form: Some(Form {
				username: Some(UsernameField {
					placeholder: Some("Email".into()),
					fields: vec!["email".into()],
				}),
				captcha: Some(Captcha {
					provider: "turnstile".into(),
					options: [
						("sitekey".to_owned(), serde_json::json!("site-key")),
						("secret".to_owned(), serde_json::json!("captcha-secret")),
						("theme".to_owned(), serde_json::json!("dark")),
					]
					.into_iter()
					.collect(),
				}),
				remember_me: true,
				..Default::default()
			}),
			third_party: Some(ThirdParty {
				register: Some(AutoRegister { auto: true, role: Some("admin".into()) }),
				redirect_uri: Some("https://app.example.com/cb/{provider}".into()),
				providers: vec![Provider {
					id: "apple".into(),
					title: "Apple".into(),
					logo: "/logo/apple.svg".into(),
					color: "#000".into(),
					text_color: "#fff".into(),
					client_id: "com.example".into(),
					client_secret: SecretString::new("s3cr3t"),
					client_secret_generator: Some(ClientSecretGenerator::AppleJwt {
						team_id: "TEAM".into(),
						key_id: "KEY".into(),
						private_key: SecretString::new("apple.p8"),
						expires_in: None,
					}),
					scopes: vec!["name".into(), "email".into()],
					response_mode: Some("form_post".into()),
					pkce: true,
					endpoints: Some(Endpoints {
						authorization: Some("https://appleid.apple.com/auth/authorize".into()),
						..Default::default()
					}),
					mapping: [("sub".to_owned(), "id".to_owned())].into_iter().collect(),
					..Default::default()
				}],
			}),
			..Default::default()
		}
	}

	#[test]
	fn providers_keep_only_display_fields() {
		let public = to_public(&full_fixture());
		let provider = &public.providers()[0];

		assert_eq!(provider.id, "apple");
		assert_eq!(provider.title, "Apple");
		assert_eq!(provider.logo, "/logo/apple.svg");
		assert_eq!(provider.color, "#000");
		assert_eq!(provider.text_color, "#fff");
		assert!(provider.client_id.is_empty());
		assert!(provider.client_secret.is_empty());
		assert!(provider.client_secret_generator.is_none());
		assert!(provider.scopes.is_empty());
		assert!(provider.endpoints.is_none());
		assert!(provider.mapping.is_empty());
		assert!(provider.response_mode.is_none());
		assert!(!provider.pkce);
	}

	#[test]
	fn captcha_secret_is_removed_and_other_options_pass() {
		let public = to_public(&full_fixture());
		let captcha = public
			.form
			.as_ref()
			.and_then(|form| form.captcha.as_ref())
			.expect("Captcha should survive redaction.");

		assert!(!captcha.options.contains_key("secret"));
		assert_eq!(captcha.options.get("sitekey"), Some(&serde_json::json!("site-key")));
		assert_eq!(captcha.options.get("theme"), Some(&serde_json::json!("dark")));
		assert_eq!(captcha.provider, "turnstile");
	}

	#[test]
	fn display_fields_pass_through_and_internal_settings_drop() {
		let full = full_fixture();
		let public = to_public(&full);

		assert_eq!(public.title, full.title);
		assert_eq!(public.description, full.description);
		assert_eq!(
			public.form.as_ref().and_then(|f| f.username.clone()),
			full.form.as_ref().and_then(|f| f.username.clone())
		);

		let third_party = public.third_party.as_ref().expect("Third party should remain.");

		assert!(third_party.register.is_none());
		assert!(third_party.redirect_uri.is_none());
	}

	#[test]
	fn redaction_is_pure() {
		let full = full_fixture();
		let before = full.clone();

		assert_eq!(to_public(&full), to_public(&full));
		assert_eq!(full, before);
	}

	#[test]
	fn public_json_omits_credential_keys() {
		let json = serde_json::to_string(&to_public(&full_fixture()))
			.expect("Public config should serialize.");

		for needle in ["client_id", "client_secret", "scopes", "endpoints", "mapping", "s3cr3t"] {
			assert!(!json.contains(needle), "Public JSON leaked `{needle}`.");
		}
	}
}
