//! Locale keys used to index per-language signin configurations.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

/// Locale assumed as the default when a source declares none and it is loaded.
pub const FALLBACK_LOCALE: &str = "en";

/// Normalized, lowercase language tag (`en`, `zh-cn`).
///
/// Tags differing only in case, surrounding whitespace, or `_` versus `-` separators map to
/// the same key.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleKey(String);
impl LocaleKey {
	/// Normalizes a raw tag, returning `None` for empty input.
	pub fn normalize(tag: impl AsRef<str>) -> Option<Self> {
		let trimmed = tag.as_ref().trim();

		if trimmed.is_empty() {
			return None;
		}

		let key = trimmed
			.chars()
			.map(|ch| if ch == '_' { '-' } else { ch.to_ascii_lowercase() })
			.collect::<String>();

		Some(Self(key))
	}

	/// Borrows the key as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for LocaleKey {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for LocaleKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for LocaleKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<LocaleKey> for String {
	fn from(value: LocaleKey) -> Self {
		value.0
	}
}
impl TryFrom<String> for LocaleKey {
	type Error = LocaleError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::normalize(value).ok_or(LocaleError::Empty)
	}
}
impl FromStr for LocaleKey {
	type Err = LocaleError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::normalize(s).ok_or(LocaleError::Empty)
	}
}
impl Debug for LocaleKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Locale({})", self.0)
	}
}
impl Display for LocaleKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Error returned when a locale tag cannot be normalized.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum LocaleError {
	/// The tag was empty or whitespace.
	#[error("Locale tag cannot be empty.")]
	Empty,
}
