//! `$ENV.<NAME>` placeholder substitution applied to raw configuration documents.
//!
//! Substitution runs once per load, before documents are deserialized, and rewrites every
//! string leaf and object key of the JSON tree. Keys that resolve to nothing are dropped. Unset variables resolve to the empty string so a literal
//! placeholder can never reach a reader.

// self
use crate::_prelude::*;

/// Placeholder prefix recognized inside string values.
pub const ENV_PREFIX: &str = "$ENV.";

/// Source of environment variables consulted during substitution.
pub trait Environment
where
	Self: Send + Sync,
{
	/// Returns the value of `name`, or `None` when the variable is unset.
	fn var(&self, name: &str) -> Option<String>;
}

/// Reads variables from the process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;
impl Environment for ProcessEnv {
	fn var(&self, name: &str) -> Option<String> {
		std::env::var(name).ok()
	}
}

/// Fixed variable map for embedders and tests that must not touch the process environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapEnv(BTreeMap<String, String>);
impl MapEnv {
	/// Creates an empty environment.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces a variable.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.0.insert(name.into(), value.into());

		self
	}
}
impl<K, V> FromIterator<(K, V)> for MapEnv
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}
impl Environment for MapEnv {
	fn var(&self, name: &str) -> Option<String> {
		self.0.get(name).cloned()
	}
}

/// Outcome of a substitution pass. Holds variable names only, never values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
	/// Number of placeholders that resolved to a set variable.
	pub resolved: usize,
	/// Variables that were referenced but unset.
	pub missing: BTreeSet<String>,
	/// Number of fields blanked because a resolved value still carried a placeholder.
	pub blanked: usize,
}
impl SubstitutionReport {
	/// Folds another report into this one.
	pub fn merge(&mut self, other: SubstitutionReport) {
		self.resolved += other.resolved;
		self.blanked += other.blanked;
		self.missing.extend(other.missing);
	}
}

/// Rewrites every string leaf of `value` in place.
pub fn substitute(value: &mut serde_json::Value, env: &dyn Environment) -> SubstitutionReport {
	let mut report = SubstitutionReport::default();

	walk(value, env, &mut report);

	report
}

/// Resolves all placeholders in a single string.
///
/// The result never contains [`ENV_PREFIX`]; if a variable's own value does, the whole
/// field is blanked.
pub fn resolve_str(input: &str, env: &dyn Environment, report: &mut SubstitutionReport) -> String {
	if !input.contains(ENV_PREFIX) {
		return input.to_owned();
	}

	let mut out = String::with_capacity(input.len());
	let mut rest = input;

	while let Some(at) = rest.find(ENV_PREFIX) {
		out.push_str(&rest[..at]);

		let tail = &rest[at + ENV_PREFIX.len()..];
		let name_len =
			tail.find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_')).unwrap_or(tail.len());
		let name = &tail[..name_len];

		if !name.is_empty() {
			match env.var(name) {
				Some(value) => {
					report.resolved += 1;
					out.push_str(&value);
				},
				None => {
					report.missing.insert(name.to_owned());
				},
			}
		}

		rest = &tail[name_len..];
	}

	out.push_str(rest);

	if out.contains(ENV_PREFIX) {
		report.blanked += 1;

		return String::new();
	}

	out
}

fn walk(value: &mut serde_json::Value, env: &dyn Environment, report: &mut SubstitutionReport) {
	match value {
		serde_json::Value::String(s) =>
			if s.contains(ENV_PREFIX) {
				*s = resolve_str(s, env, report);
			},
		serde_json::Value::Array(items) =>
			for item in items {
				walk(item, env, report);
			},
		serde_json::Value::Object(map) => {
			if map.keys().any(|key| key.contains(ENV_PREFIX)) {
				*map = resolve_keys(std::mem::take(map), env, report);
			}

			for (_, item) in map.iter_mut() {
				walk(item, env, report);
			}
		},
		_ => {},
	}
}

// Keys that resolve to nothing are dropped; on collision the first entry wins.
fn resolve_keys(
	map: serde_json::Map<String, serde_json::Value>,
	env: &dyn Environment,
	report: &mut SubstitutionReport,
) -> serde_json::Map<String, serde_json::Value> {
	let mut resolved = serde_json::Map::with_capacity(map.len());

	for (key, item) in map {
		let key = resolve_str(&key, env, report);

		if key.is_empty() {
			continue;
		}
		if !resolved.contains_key(&key) {
			resolved.insert(key, item);
		}
	}

	resolved
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn whole_value_placeholder_is_replaced_or_emptied() {
		let env = MapEnv::new().with("GOOGLE_CLIENT_ID", "abc.apps");
		let mut report = SubstitutionReport::default();

		assert_eq!(resolve_str("$ENV.GOOGLE_CLIENT_ID", &env, &mut report), "abc.apps");
		assert_eq!(resolve_str("$ENV.GOOGLE_CLIENT_SECRET", &env, &mut report), "");
		assert_eq!(report.resolved, 1);
		assert!(report.missing.contains("GOOGLE_CLIENT_SECRET"));
	}

	#[test]
	fn embedded_and_bare_placeholders_never_survive() {
		let env = MapEnv::new().with("HOST", "auth.example.com");
		let mut report = SubstitutionReport::default();

		assert_eq!(
			resolve_str("https://$ENV.HOST/callback", &env, &mut report),
			"https://auth.example.com/callback"
		);
		assert_eq!(resolve_str("prefix-$ENV.-suffix", &env, &mut report), "prefix--suffix");
		assert_eq!(resolve_str("$ENV.", &env, &mut report), "");
	}

	#[test]
	fn variable_values_carrying_placeholders_blank_the_field() {
		let env = MapEnv::new().with("A", "$ENV.B");
		let mut report = SubstitutionReport::default();

		assert_eq!(resolve_str("$ENV.A", &env, &mut report), "");
		assert_eq!(report.blanked, 1);
	}

	#[test]
	fn process_env_reads_the_process_environment() {
		const UNSET: &str = "SIGNIN_BROKER_ENV_TEST_UNSET_7C1E";

		let mut report = SubstitutionReport::default();

		assert_eq!(ProcessEnv.var("PATH"), std::env::var("PATH").ok());
		assert_eq!(ProcessEnv.var(UNSET), None);
		assert_eq!(resolve_str(&format!("$ENV.{UNSET}"), &ProcessEnv, &mut report), "");
		assert!(report.missing.contains(UNSET));
	}

	#[test]
	fn object_keys_are_resolved_or_dropped() {
		let env = MapEnv::new().with("CLAIM", "sub");
		let mut doc = serde_json::json!({
			"form": { "captcha": { "options": { "$ENV.K": "v", "theme": "dark" } } },
			"mapping": { "$ENV.CLAIM": "id", "prefix_$ENV.CLAIM": "alt" }
		});
		let report = substitute(&mut doc, &env);

		assert!(!doc.to_string().contains(ENV_PREFIX));
		assert_eq!(doc["form"]["captcha"]["options"], serde_json::json!({ "theme": "dark" }));
		assert_eq!(doc["mapping"], serde_json::json!({ "sub": "id", "prefix_sub": "alt" }));
		assert!(report.missing.contains("K"));
	}

	#[test]
	fn substitute_walks_nested_objects_and_arrays() {
		let env = MapEnv::new().with("SITEKEY", "site-123");
		let mut doc = serde_json::json!({
			"title": "Sign in",
			"form": { "captcha": { "options": { "sitekey": "$ENV.SITEKEY", "secret": "$ENV.SECRET" } } },
			"third_party": { "providers": [{ "id": "google", "scopes": ["$ENV.SCOPE", "email"] }] },
			"count": 3
		});
		let report = substitute(&mut doc, &env);

		assert_eq!(doc["form"]["captcha"]["options"]["sitekey"], "site-123");
		assert_eq!(doc["form"]["captcha"]["options"]["secret"], "");
		assert_eq!(doc["third_party"]["providers"][0]["scopes"][0], "");
		assert_eq!(doc["count"], 3);
		assert_eq!(report.resolved, 1);
		assert_eq!(
			report.missing.iter().map(String::as_str).collect::<Vec<_>>(),
			vec!["SCOPE", "SECRET"]
		);
	}
}
