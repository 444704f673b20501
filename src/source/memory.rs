//! In-memory [`ConfigSource`] for embedders, demos, and tests.

// self
use crate::{
	_prelude::*,
	source::{self, ConfigSource, RawDocument, RawSource},
};

/// Holds locale documents that were built or parsed in-process.
#[derive(Clone, Debug, Default)]
pub struct MemorySource(RawSource);
impl MemorySource {
	/// Creates an empty source.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a document from an already-parsed JSON value.
	pub fn with_document(mut self, locale: impl Into<String>, value: serde_json::Value) -> Self {
		let locale = locale.into();

		self.0.documents.push(RawDocument {
			origin: format!("memory:{locale}"),
			locale,
			value,
		});

		self
	}

	/// Parses a JSON string and adds it as a document.
	pub fn with_json(self, locale: impl Into<String>, json: &str) -> Result<Self, LoadError> {
		let locale = locale.into();
		let value = source::parse_json(&format!("memory:{locale}"), json.as_bytes())?;

		Ok(self.with_document(locale, value))
	}

	/// Declares the default locale explicitly.
	pub fn with_default(mut self, locale: impl Into<String>) -> Self {
		self.0.default_locale = Some(locale.into());

		self
	}
}
impl ConfigSource for MemorySource {
	fn read(&self) -> Result<RawSource, LoadError> {
		Ok(self.0.clone())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_preserves_order_and_default() {
		let source = MemorySource::new()
			.with_json("zh-cn", "{\"title\":\"登录\"}")
			.expect("Chinese fixture should parse.")
			.with_document("en", serde_json::json!({ "title": "Sign in" }))
			.with_default("en");
		let raw = source.read().expect("Memory source should always read.");

		assert_eq!(raw.default_locale.as_deref(), Some("en"));
		assert_eq!(
			raw.documents.iter().map(|d| d.locale.as_str()).collect::<Vec<_>>(),
			vec!["zh-cn", "en"]
		);
		assert_eq!(raw.documents[0].origin, "memory:zh-cn");
	}

	#[test]
	fn malformed_json_reports_origin() {
		let err = MemorySource::new()
			.with_json("en", "{\"title\": ")
			.expect_err("Truncated JSON should be rejected.");

		assert!(matches!(err, LoadError::Parse { ref origin, .. } if origin == "memory:en"));
	}
}
