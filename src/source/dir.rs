//! Directory-backed [`ConfigSource`] reading one JSON file per locale.

// std
use std::{
	fs,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	source::{self, ConfigSource, RawDocument, RawSource},
};

/// Reads `<locale>.json` or `<name>.<locale>.json` files from a directory.
///
/// The locale is the last dot-separated segment of the file stem, so `signin.zh-cn.json`
/// yields `zh-cn`. An optional plain-text file named `default` holds the default locale.
/// Files without a `.json` extension are ignored.
#[derive(Clone, Debug)]
pub struct DirSource {
	path: PathBuf,
}
impl DirSource {
	/// Name of the optional file declaring the default locale.
	pub const DEFAULT_FILE: &'static str = "default";

	/// Creates a source rooted at `path`. Nothing is read until [`ConfigSource::read`].
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Directory this source reads from.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn locale_of(path: &Path) -> Option<String> {
		if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
			return None;
		}

		let stem = path.file_stem()?.to_str()?;
		let locale = stem.rsplit('.').next().unwrap_or(stem);

		Some(locale.to_owned())
	}

	fn read_default(&self) -> Result<Option<String>, LoadError> {
		let path = self.path.join(Self::DEFAULT_FILE);

		if !path.is_file() {
			return Ok(None);
		}

		let text = fs::read_to_string(&path)
			.map_err(|e| LoadError::read(path.display().to_string(), e))?;
		let trimmed = text.trim();

		Ok((!trimmed.is_empty()).then(|| trimmed.to_owned()))
	}
}
impl ConfigSource for DirSource {
	fn read(&self) -> Result<RawSource, LoadError> {
		let origin = self.path.display().to_string();

		if !self.path.exists() {
			return Ok(RawSource::default());
		}

		let entries = fs::read_dir(&self.path).map_err(|e| LoadError::read(&origin, e))?;
		let mut files = Vec::new();

		for entry in entries {
			let entry = entry.map_err(|e| LoadError::read(&origin, e))?;
			let path = entry.path();

			if !path.is_file() {
				continue;
			}
			if let Some(locale) = Self::locale_of(&path) {
				files.push((path, locale));
			}
		}

		// Directory iteration order is platform dependent.
		files.sort();

		let mut documents = Vec::with_capacity(files.len());

		for (path, locale) in files {
			let origin = path.display().to_string();
			let bytes = fs::read(&path).map_err(|e| LoadError::read(&origin, e))?;
			let value = source::parse_json(&origin, &bytes)?;

			documents.push(RawDocument { locale, origin, value });
		}

		Ok(RawSource { default_locale: self.read_default()?, documents })
	}
}
