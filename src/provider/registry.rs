// self
use crate::{_prelude::*, config::Provider, locale::LocaleKey};

/// Providers indexed by ID, built once per generation from the canonical locale.
///
/// Provider credentials are locale-invariant; the registry always reflects the default
/// locale's provider list so lookups do not depend on the requested locale.
#[derive(Clone, Debug, Default)]
pub struct ProviderRegistry {
	source_locale: Option<LocaleKey>,
	order: Vec<String>,
	by_id: HashMap<String, Arc<Provider>>,
}
impl ProviderRegistry {
	/// Indexes `providers`; on duplicate IDs the first entry wins.
	pub fn from_providers(source_locale: Option<LocaleKey>, providers: &[Provider]) -> Self {
		let mut registry = Self { source_locale, ..Default::default() };

		for provider in providers {
			if provider.id.is_empty() {
				tracing::warn!(title = %provider.title, "Skipping provider without an id.");

				continue;
			}
			if registry.by_id.contains_key(&provider.id) {
				tracing::warn!(provider = %provider.id, "Duplicate provider id; keeping the first.");

				continue;
			}

			registry.order.push(provider.id.clone());
			registry.by_id.insert(provider.id.clone(), Arc::new(provider.clone()));
		}

		registry
	}

	/// Looks up a provider by exact ID.
	pub fn find(&self, id: &str) -> Option<&Arc<Provider>> {
		self.by_id.get(id)
	}

	/// Provider IDs in declaration order.
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.order.iter().map(String::as_str)
	}

	/// Locale whose provider list backs this registry.
	pub fn source_locale(&self) -> Option<&LocaleKey> {
		self.source_locale.as_ref()
	}

	/// Number of indexed providers.
	pub fn len(&self) -> usize {
		self.order.len()
	}

	/// Returns true when no providers are indexed.
	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	/// Returns true when `providers` declares exactly the indexed ID set.
	pub fn matches_ids(&self, providers: &[Provider]) -> bool {
		let other = providers
			.iter()
			.filter(|p| !p.id.is_empty())
			.map(|p| p.id.as_str())
			.collect::<BTreeSet<_>>();

		other.len() == self.by_id.len() && other.iter().all(|id| self.by_id.contains_key(*id))
	}
}
