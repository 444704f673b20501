//! Process-wide, load-once/read-many store of per-locale sign-in configurations.
//!
//! Every load builds a complete [`Generation`] off to the side and publishes it with one
//! atomic pointer swap. Readers never block and always observe either the old or the new
//! generation in full; a failed load leaves the published generation untouched.

// std
use std::sync::{
	LazyLock,
	atomic::{AtomicU64, Ordering},
};
// crates.io
use arc_swap::ArcSwap;
// self
use crate::{
	_prelude::*,
	config::Config,
	env::{self, Environment, SubstitutionReport},
	locale::{FALLBACK_LOCALE, LocaleKey},
	obs::{self, OpKind, OpOutcome, OpSpan},
	provider::ProviderRegistry,
	redact,
	source::{ConfigSource, RawSource},
};

static GLOBAL: LazyLock<ConfigStore> = LazyLock::new(ConfigStore::new);

/// One immutable, fully resolved set of locale configurations.
#[derive(Debug)]
pub struct Generation {
	/// Monotonic load counter; `0` for the empty generation a store starts with.
	pub number: u64,
	/// Instant the generation was published.
	pub loaded_at: OffsetDateTime,
	/// Resolved configurations keyed by normalized locale.
	pub locales: BTreeMap<LocaleKey, Arc<Config>>,
	/// Locale used when a request names no loaded locale.
	pub default_locale: Option<LocaleKey>,
	/// Providers of the default locale, indexed by ID.
	pub registry: ProviderRegistry,
}
impl Generation {
	fn empty() -> Self {
		Self {
			number: 0,
			loaded_at: OffsetDateTime::now_utc(),
			locales: BTreeMap::new(),
			default_locale: None,
			registry: ProviderRegistry::default(),
		}
	}

	/// Resolves a requested tag to a loaded locale key.
	///
	/// Tries the exact normalized key, then the default locale. Unknown or empty tags never
	/// fail; they fall back silently.
	pub fn resolve(&self, tag: &str) -> Option<&LocaleKey> {
		LocaleKey::normalize(tag)
			.and_then(|key| self.locales.get_key_value(key.as_str()))
			.map(|(found, _)| found)
			.or(self.default_locale.as_ref())
	}

	/// Full configuration for the resolved locale.
	pub fn config(&self, tag: &str) -> Option<&Arc<Config>> {
		self.resolve(tag).and_then(|key| self.locales.get(key))
	}
}

/// Summary returned by a successful load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadSummary {
	/// Number of the published generation.
	pub generation: u64,
	/// Loaded locale keys, sorted.
	pub locales: Vec<String>,
	/// Selected default locale.
	pub default_locale: Option<String>,
	/// Number of providers in the canonical registry.
	pub providers: usize,
	/// Placeholder substitution statistics across all documents.
	pub substitution: SubstitutionReport,
}

/// Hot-swappable, concurrently readable configuration store.
pub struct ConfigStore {
	current: ArcSwap<Generation>,
	writer: Mutex<()>,
	next_number: AtomicU64,
}
impl ConfigStore {
	/// Creates a store holding an empty generation.
	pub fn new() -> Self {
		Self {
			current: ArcSwap::from_pointee(Generation::empty()),
			writer: Mutex::new(()),
			next_number: AtomicU64::new(1),
		}
	}

	/// Process-wide store shared by the request handlers.
	pub fn global() -> &'static ConfigStore {
		&GLOBAL
	}

	/// Reads `source`, resolves placeholders against `env`, and publishes a new generation.
	///
	/// On error the previously published generation stays active.
	pub fn load(&self, source: &dyn ConfigSource, env: &dyn Environment) -> Result<LoadSummary> {
		const KIND: OpKind = OpKind::Load;

		let _span = OpSpan::new(KIND, "load").entered();

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = self.load_inner(source, env);

		if let Err(e) = &result {
			tracing::error!(
				error = %e,
				"Signin configuration load failed; keeping the active generation."
			);
		}

		obs::finish(KIND, result)
	}

	fn load_inner(&self, source: &dyn ConfigSource, env: &dyn Environment) -> Result<LoadSummary> {
		// Serialize writers so generation numbers follow publish order.
		let _writer = self.writer.lock();
		let raw = source.read()?;
		let (generation, substitution) = build_generation(raw, env, || {
			self.next_number.fetch_add(1, Ordering::Relaxed)
		})?;
		let summary = LoadSummary {
			generation: generation.number,
			locales: generation.locales.keys().map(|key| key.as_str().to_owned()).collect(),
			default_locale: generation.default_locale.clone().map(String::from),
			providers: generation.registry.len(),
			substitution,
		};

		self.current.store(Arc::new(generation));

		obs::record_published(
			summary.generation,
			summary.locales.len(),
			summary.providers,
			summary.substitution.missing.len(),
		);

		tracing::info!(
			generation = summary.generation,
			locales = ?summary.locales,
			default_locale = ?summary.default_locale,
			providers = summary.providers,
			"Published signin configuration generation."
		);

		Ok(summary)
	}

	/// Current generation snapshot.
	pub fn generation(&self) -> Arc<Generation> {
		self.current.load_full()
	}

	/// Full (credential-bearing) configuration for `locale`, with fallback to the default.
	///
	/// Returns `None` when nothing is loaded. Never expose the result to unauthenticated
	/// callers; use [`ConfigStore::public_config`] instead.
	pub fn full_config(&self, locale: &str) -> Option<Arc<Config>> {
		self.current.load().config(locale).cloned()
	}

	/// Redacted configuration for `locale`, re-derived from the full configuration on
	/// every call.
	pub fn public_config(&self, locale: &str) -> Option<Config> {
		self.current.load().config(locale).map(|full| redact::to_public(full))
	}

	/// Loaded locale keys, sorted.
	pub fn available_locales(&self) -> Vec<String> {
		self.current.load().locales.keys().map(|key| key.as_str().to_owned()).collect()
	}

	/// Default locale of the current generation.
	pub fn default_locale(&self) -> Option<String> {
		self.current.load().default_locale.as_ref().map(|key| key.as_str().to_owned())
	}
}
impl Default for ConfigStore {
	fn default() -> Self {
		Self::new()
	}
}
impl Debug for ConfigStore {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let current = self.current.load();

		f.debug_struct("ConfigStore")
			.field("generation", &current.number)
			.field("locales", &current.locales.keys().collect::<Vec<_>>())
			.field("default_locale", &current.default_locale)
			.finish()
	}
}

fn build_generation(
	raw: RawSource,
	env: &dyn Environment,
	next_number: impl FnOnce() -> u64,
) -> Result<(Generation, SubstitutionReport)> {
	let mut locales = BTreeMap::new();
	let mut flagged_default: Option<LocaleKey> = None;
	let mut substitution = SubstitutionReport::default();

	for mut document in raw.documents {
		let key = LocaleKey::normalize(&document.locale)
			.ok_or_else(|| LoadError::InvalidLocale { origin: document.origin.clone() })?;

		if locales.contains_key(&key) {
			return Err(LoadError::DuplicateLocale { locale: key.into() }.into());
		}

		substitution.merge(env::substitute(&mut document.value, env));

		let config: Config = serde_path_to_error::deserialize(document.value)
			.map_err(|e| LoadError::parse(&document.origin, e))?;

		if config.default {
			if let Some(first) = &flagged_default {
				return Err(LoadError::ConflictingDefaults {
					first: first.as_str().to_owned(),
					second: key.into(),
				}
				.into());
			}

			flagged_default = Some(key.clone());
		}

		locales.insert(key, Arc::new(config));
	}

	if !substitution.missing.is_empty() {
		tracing::warn!(
			missing = ?substitution.missing,
			"Signin configuration references unset environment variables; they resolve to empty strings."
		);
	}

	let default_locale = select_default(raw.default_locale.as_deref(), flagged_default, &locales)?;
	let registry = default_locale
		.as_ref()
		.and_then(|key| locales.get(key).map(|config| (key, config)))
		.map(|(key, config)| ProviderRegistry::from_providers(Some(key.clone()), config.providers()))
		.unwrap_or_default();

	for (key, config) in &locales {
		if Some(key) != default_locale.as_ref() && !registry.matches_ids(config.providers()) {
			tracing::warn!(
				locale = %key,
				canonical = ?registry.source_locale(),
				"Locale declares a different provider set; dispatch uses the canonical locale's providers."
			);
		}
	}

	let generation = Generation {
		number: next_number(),
		loaded_at: OffsetDateTime::now_utc(),
		locales,
		default_locale,
		registry,
	};

	Ok((generation, substitution))
}

fn select_default(
	declared: Option<&str>,
	flagged: Option<LocaleKey>,
	locales: &BTreeMap<LocaleKey, Arc<Config>>,
) -> Result<Option<LocaleKey>, LoadError> {
	if let Some(declared) = declared.and_then(LocaleKey::normalize) {
		if !locales.contains_key(&declared) {
			return Err(LoadError::UnknownDefault { locale: declared.into() });
		}

		return Ok(Some(declared));
	}
	if flagged.is_some() {
		return Ok(flagged);
	}
	if let Some((key, _)) = locales.get_key_value(FALLBACK_LOCALE) {
		return Ok(Some(key.clone()));
	}

	Ok(locales.keys().next().cloned())
}
