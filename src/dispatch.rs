//! Authorization dispatch: turns a provider ID into an authorization-code redirect.
//!
//! The dispatcher reads the canonical provider registry of the current generation, checks
//! provider completeness, and builds the authorization URL. It performs no I/O and never
//! emits a URL with a missing `client_id` or authorization endpoint. Unknown providers are
//! always reported before incomplete ones.

/// PKCE verifier and S256 challenge generation.
pub mod pkce;

pub use pkce::*;

// self
use crate::{
	_prelude::*,
	config::Provider,
	obs::{self, OpKind, OpOutcome, OpSpan},
	provider,
	store::{ConfigStore, Generation},
};
use pkce::{PkcePair, random_string};

const STATE_LEN: usize = 32;
const PROVIDER_PLACEHOLDER: &str = "{provider}";
// Fixed provider parameters may not override these.
const RESERVED_PARAMS: &[&str] = &[
	"response_type",
	"client_id",
	"redirect_uri",
	"scope",
	"state",
	"response_mode",
	"code_challenge",
	"code_challenge_method",
];

/// Caller-supplied authorization parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthorizationParams {
	/// Callback override; must be an absolute http(s) URL.
	pub redirect_uri: Option<String>,
	/// Opaque CSRF state; a random nonce is generated when absent.
	pub state: Option<String>,
	/// Requested locale. Providers are locale-invariant, so this only tags diagnostics.
	pub locale: Option<String>,
}
impl AuthorizationParams {
	/// Creates empty parameters.
	pub fn new() -> Self {
		Self::default()
	}

	/// Overrides the callback URL.
	pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.redirect_uri = Some(redirect_uri.into());

		self
	}

	/// Supplies the CSRF state.
	pub fn state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Tags the request with a locale.
	pub fn locale(mut self, locale: impl Into<String>) -> Self {
		self.locale = Some(locale.into());

		self
	}
}

/// Authorization redirect produced by [`AuthorizationDispatcher::authorize`].
#[derive(Clone)]
pub struct AuthorizationRequest {
	/// Provider the redirect targets.
	pub provider: String,
	/// Fully formed authorization URL to send the user agent to.
	pub url: Url,
	/// State value embedded in the URL; must round-trip through the callback.
	pub state: String,
	/// Redirect URI embedded in the URL, if any.
	pub redirect_uri: Option<Url>,
	pkce: Option<PkcePair>,
}
impl AuthorizationRequest {
	/// PKCE verifier to keep server-side for the code exchange, when PKCE is enabled.
	pub fn code_verifier(&self) -> Option<&str> {
		self.pkce.as_ref().map(|pair| pair.verifier.as_str())
	}

	/// Validates the `state` returned on the callback.
	pub fn matches_state(&self, returned_state: &str) -> bool {
		returned_state == self.state
	}
}
impl Debug for AuthorizationRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationRequest")
			.field("provider", &self.provider)
			.field("url", &self.url.as_str())
			.field("state", &self.state)
			.field("redirect_uri", &self.redirect_uri.as_ref().map(Url::as_str))
			.field("pkce", &self.pkce.is_some())
			.finish()
	}
}

/// Builds authorization redirects against a [`ConfigStore`].
#[derive(Clone, Copy, Debug)]
pub struct AuthorizationDispatcher<'a> {
	store: &'a ConfigStore,
}
impl<'a> AuthorizationDispatcher<'a> {
	/// Creates a dispatcher reading from `store`.
	pub fn new(store: &'a ConfigStore) -> Self {
		Self { store }
	}

	/// Dispatcher bound to the process-wide store.
	pub fn global() -> AuthorizationDispatcher<'static> {
		AuthorizationDispatcher::new(ConfigStore::global())
	}

	/// Builds the authorization redirect for `provider_id`.
	///
	/// # Errors
	///
	/// - [`Error::ProviderNotFound`] when the ID is unknown (checked first).
	/// - [`Error::ProviderIncomplete`] when the provider lacks a client ID, a resolvable
	///   secret, or a usable authorization endpoint.
	/// - [`Error::InvalidRedirectUri`] when the caller's redirect override is not an absolute
	///   http(s) URL.
	pub fn authorize(
		&self,
		provider_id: &str,
		params: AuthorizationParams,
	) -> Result<AuthorizationRequest> {
		const KIND: OpKind = OpKind::Authorize;

		let _span = OpSpan::new(KIND, "authorize").entered();

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let generation = self.store.generation();
		let result = build_request(&generation, provider_id, params);

		if let Err(e) = &result {
			obs::record_rejection(e.status());

			tracing::debug!(
				provider = provider_id,
				status = e.status(),
				"Authorization dispatch rejected."
			);
		}

		obs::finish(KIND, result)
	}
}

fn build_request(
	generation: &Generation,
	provider_id: &str,
	params: AuthorizationParams,
) -> Result<AuthorizationRequest> {
	let provider = generation
		.registry
		.find(provider_id)
		.ok_or_else(|| Error::ProviderNotFound { id: provider_id.to_owned() })?;
	let endpoint = provider::ensure_complete(provider)?;
	let redirect_uri = resolve_redirect_uri(generation, provider, params.redirect_uri.as_deref())?;
	let state = params.state.filter(|s| !s.is_empty()).unwrap_or_else(|| random_string(STATE_LEN));
	let pkce = provider.pkce.then(PkcePair::generate);
	let url = build_authorize_url(endpoint, provider, redirect_uri.as_ref(), &state, pkce.as_ref());

	tracing::debug!(
		provider = %provider.id,
		locale = params.locale.as_deref().unwrap_or_default(),
		pkce = pkce.is_some(),
		"Built authorization URL."
	);

	Ok(AuthorizationRequest { provider: provider.id.clone(), url, state, redirect_uri, pkce })
}

/// Caller override, then the provider's callback, then the shared third-party template.
fn resolve_redirect_uri(
	generation: &Generation,
	provider: &Provider,
	requested: Option<&str>,
) -> Result<Option<Url>> {
	if let Some(requested) = requested.map(str::trim).filter(|s| !s.is_empty()) {
		return parse_callback(requested).map(Some).ok_or(Error::InvalidRedirectUri);
	}

	let configured = provider.redirect_uri.clone().filter(|s| !s.is_empty()).or_else(|| {
		generation
			.default_locale
			.as_ref()
			.and_then(|key| generation.locales.get(key))
			.and_then(|config| config.third_party.as_ref())
			.and_then(|tp| tp.redirect_uri.as_deref())
			.filter(|s| !s.is_empty())
			.map(|template| template.replace(PROVIDER_PLACEHOLDER, &provider.id))
	});

	Ok(configured.and_then(|raw| {
		let parsed = parse_callback(&raw);

		if parsed.is_none() {
			tracing::warn!(
				provider = %provider.id,
				"Configured redirect_uri is not an absolute URL; omitting it."
			);
		}

		parsed
	}))
}

fn parse_callback(raw: &str) -> Option<Url> {
	Url::parse(raw).ok().filter(|url| matches!(url.scheme(), "https" | "http") && url.has_host())
}

fn build_authorize_url(
	mut url: Url,
	provider: &Provider,
	redirect_uri: Option<&Url>,
	state: &str,
	pkce: Option<&PkcePair>,
) -> Url {
	let mut pairs = url.query_pairs_mut();

	pairs.append_pair("response_type", "code");
	pairs.append_pair("client_id", &provider.client_id);

	if let Some(redirect_uri) = redirect_uri {
		pairs.append_pair("redirect_uri", redirect_uri.as_str());
	}
	if let Some(scope) = format_scope(&provider.scopes, provider.scope_delimiter()) {
		pairs.append_pair("scope", &scope);
	}

	pairs.append_pair("state", state);

	if let Some(mode) = provider.response_mode.as_deref().filter(|m| !m.is_empty()) {
		pairs.append_pair("response_mode", mode);
	}
	if let Some(pkce) = pkce {
		pairs.append_pair("code_challenge", &pkce.challenge);
		pairs.append_pair("code_challenge_method", pkce.method.as_str());
	}
	if let Some(endpoints) = provider.endpoints.as_ref() {
		for (key, value) in &endpoints.params {
			if !RESERVED_PARAMS.contains(&key.as_str()) {
				pairs.append_pair(key, value);
			}
		}
	}

	drop(pairs);

	url
}

/// Joins non-empty scopes with the provider's delimiter.
fn format_scope(scopes: &[String], delimiter: char) -> Option<String> {
	let mut buf = String::new();

	for scope in scopes.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
		if !buf.is_empty() {
			buf.push(delimiter);
		}

		buf.push_str(scope);
	}

	(!buf.is_empty()).then_some(buf)
}
