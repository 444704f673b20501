//! Configuration source contracts and built-in readers.
//!
//! A source only produces raw, locale-tagged JSON documents. Placeholder substitution,
//! locale normalization, and deserialization happen in [`crate::store::ConfigStore::load`],
//! so every reader gets the same guarantees.

pub mod dir;
pub mod memory;

pub use dir::DirSource;
pub use memory::MemorySource;

// self
use crate::_prelude::*;

/// One locale document as read from a source.
#[derive(Clone, Debug, PartialEq)]
pub struct RawDocument {
	/// Locale tag as written in the source (not yet normalized).
	pub locale: String,
	/// Human-readable origin used in load errors (file path or label).
	pub origin: String,
	/// Parsed JSON document, placeholders still unresolved.
	pub value: serde_json::Value,
}

/// Everything a source yields for one load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawSource {
	/// Default locale declared by the source itself, if any.
	pub default_locale: Option<String>,
	/// Locale documents in source order.
	pub documents: Vec<RawDocument>,
}

/// Reader contract for configuration sources.
pub trait ConfigSource
where
	Self: Send + Sync,
{
	/// Reads every locale document. Called once per load.
	fn read(&self) -> Result<RawSource, LoadError>;
}

/// Parses a JSON document, recording the failing path on error.
pub(crate) fn parse_json(origin: &str, bytes: &[u8]) -> Result<serde_json::Value, LoadError> {
	let mut de = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut de).map_err(|e| LoadError::parse(origin, e))
}
