//! Multi-locale sign-in configuration resolver with redacted public views and OAuth 2.0
//! authorization dispatch.
//!
//! Configuration is loaded once into an immutable [`store::Generation`], read lock-free by
//! request handlers, redacted on demand for unauthenticated callers, and consulted by the
//! [`dispatch::AuthorizationDispatcher`] to build authorization redirects.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod dispatch;
pub mod env;
pub mod error;
pub mod http;
pub mod locale;
pub mod obs;
pub mod provider;
pub mod redact;
pub mod source;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::Config,
		env::MapEnv,
		source::MemorySource,
		store::{ConfigStore, LoadSummary},
	};

	/// Builds an environment from `(name, value)` pairs.
	pub fn test_env<'a, I>(vars: I) -> MapEnv
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		MapEnv::from_iter(vars)
	}

	/// Loads the provided `(locale, json)` documents into a fresh store.
	pub fn load_test_store<'a, I>(documents: I, env: &MapEnv) -> (ConfigStore, LoadSummary)
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let mut source = MemorySource::new();

		for (locale, json) in documents {
			source = source
				.with_json(locale, json)
				.expect("Test fixture document should be valid JSON.");
		}

		let store = ConfigStore::new();
		let summary = store.load(&source, env).expect("Test fixture source should load.");

		(store, summary)
	}

	/// Collects every string leaf of a serialized config, keyed by its JSON pointer.
	pub fn string_leaves(config: &Config) -> Vec<(String, String)> {
		fn walk(value: &serde_json::Value, path: String, out: &mut Vec<(String, String)>) {
			match value {
				serde_json::Value::String(s) => out.push((path, s.clone())),
				serde_json::Value::Array(items) =>
					for (idx, item) in items.iter().enumerate() {
						walk(item, format!("{path}/{idx}"), out);
					},
				serde_json::Value::Object(map) =>
					for (key, item) in map {
						walk(item, format!("{path}/{key}"), out);
					},
				_ => {},
			}
		}

		let value = serde_json::to_value(config).expect("Config should serialize to JSON.");
		let mut out = Vec::new();

		walk(&value, String::new(), &mut out);

		out
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, BTreeSet, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, LoadError, Result};
}

pub use url;
#[cfg(test)] use {color_eyre as _, tempfile as _, tokio as _};
