//! Loads two locales, serves the public sign-in view, and builds a Google authorization
//! redirect through the framework-agnostic handlers.

// std
use std::collections::HashMap;
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use signin_broker::{
	dispatch::AuthorizationDispatcher,
	env::MapEnv,
	http::{self, AuthorizeQuery, SigninQuery},
	source::MemorySource,
	store::ConfigStore,
};

const EN: &str = r#"{
	"title": "Sign in",
	"third_party": {
		"redirect_uri": "https://app.example.com/signin/oauth/{provider}/callback",
		"providers": [{
			"id": "google",
			"title": "Continue with Google",
			"client_id": "$ENV.GOOGLE_CLIENT_ID",
			"client_secret": "$ENV.GOOGLE_CLIENT_SECRET",
			"scopes": ["openid", "email"],
			"pkce": true,
			"endpoints": {
				"authorization": "https://accounts.google.com/o/oauth2/v2/auth",
				"params": { "access_type": "offline" }
			}
		}]
	}
}"#;
const ZH_CN: &str = r#"{ "title": "登录", "third_party": { "providers": [{ "id": "google", "title": "使用 Google 登录" }] } }"#;

fn main() -> Result<()> {
	color_eyre::install()?;

	// Production deployments pass `env::ProcessEnv` instead.
	let env = MapEnv::new()
		.with("GOOGLE_CLIENT_ID", "demo-client.apps.googleusercontent.com")
		.with("GOOGLE_CLIENT_SECRET", "demo-secret");
	let source = MemorySource::new().with_json("en", EN)?.with_json("zh_CN", ZH_CN)?;
	let store = ConfigStore::global();
	let summary = store.load(&source, &env)?;

	println!(
		"Loaded generation {} with locales {:?} (default {:?}).",
		summary.generation, summary.locales, summary.default_locale
	);

	let public = http::signin(store, SigninQuery { locale: Some("zh-CN".into()) });

	println!("GET /signin?locale=zh-CN -> {}\n{:#}", public.status, public.body);

	let response = http::authorize(
		&AuthorizationDispatcher::global(),
		"google",
		AuthorizeQuery::default().state("demo-state"),
	);

	if !response.is_success() {
		return Err(eyre!("Authorization failed: {}", response.body));
	}

	println!("Send your user to {}.", response.body["authorization_url"]);

	// Simulate the callback handler looking up the pending request by `state`.
	let request = AuthorizationDispatcher::new(store)
		.authorize("google", AuthorizeQuery::default())?;
	let mut pending = HashMap::new();

	pending.insert(request.state.clone(), request);

	let returned_state = pending.keys().next().cloned().unwrap_or_default();

	match pending.remove(&returned_state) {
		Some(stashed) if stashed.matches_state(&returned_state) => println!(
			"Validated state; keep the PKCE verifier ({} chars) for the code exchange.",
			stashed.code_verifier().map(str::len).unwrap_or_default()
		),
		_ => eprintln!("State `{returned_state}` was not recognized."),
	}

	Ok(())
}
