// self
use crate::{_prelude::*, config::Provider};

/// Piece of provider configuration missing for an authorization redirect.
///
/// Only used for operator diagnostics; callers always see the generic
/// [`Error::ProviderIncomplete`] message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingRequirement {
	/// `client_id` is empty.
	ClientId,
	/// Neither a literal secret nor a usable secret generator is configured.
	ClientSecret,
	/// No endpoints section, or no authorization endpoint in it.
	AuthorizationEndpoint,
	/// Authorization endpoint is not an absolute http(s) URL.
	MalformedAuthorizationEndpoint,
}
impl MissingRequirement {
	/// Returns a stable label suitable for log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			MissingRequirement::ClientId => "client_id",
			MissingRequirement::ClientSecret => "client_secret",
			MissingRequirement::AuthorizationEndpoint => "authorization_endpoint",
			MissingRequirement::MalformedAuthorizationEndpoint => "authorization_endpoint_url",
		}
	}
}
impl Display for MissingRequirement {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Validates that `provider` can be dispatched, returning its parsed authorization endpoint.
pub fn check_complete(provider: &Provider) -> Result<Url, MissingRequirement> {
	if provider.client_id.trim().is_empty() {
		return Err(MissingRequirement::ClientId);
	}
	if !provider.has_resolvable_secret() {
		return Err(MissingRequirement::ClientSecret);
	}

	let raw = provider
		.endpoints
		.as_ref()
		.and_then(|endpoints| endpoints.authorization())
		.ok_or(MissingRequirement::AuthorizationEndpoint)?;
	let url = Url::parse(raw).map_err(|_| MissingRequirement::MalformedAuthorizationEndpoint)?;

	if !matches!(url.scheme(), "https" | "http") || url.cannot_be_a_base() {
		return Err(MissingRequirement::MalformedAuthorizationEndpoint);
	}

	Ok(url)
}

/// Like [`check_complete`] but maps failures into the request-path error and logs the cause.
pub fn ensure_complete(provider: &Provider) -> Result<Url> {
	check_complete(provider).map_err(|missing| {
		tracing::warn!(
			provider = %provider.id,
			missing = missing.as_str(),
			"Provider configuration is incomplete."
		);

		Error::ProviderIncomplete { provider: provider.id.clone() }
	})
}
