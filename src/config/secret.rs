//! Redacting wrapper for credential strings loaded from configuration.

// self
use crate::_prelude::*;

/// Credential string kept out of `Debug`/`Display` output.
///
/// Serializes transparently so the full configuration round-trips; the public view never
/// carries a non-empty value.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretString(String);
impl SecretString {
	/// Wraps a secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns true when no secret is configured.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl PartialEq<&str> for SecretString {
	fn eq(&self, other: &&str) -> bool {
		self.0 == *other
	}
}
impl Debug for SecretString {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		if self.0.is_empty() {
			f.write_str("SecretString(\"\")")
		} else {
			f.debug_tuple("SecretString").field(&"<redacted>").finish()
		}
	}
}
impl Display for SecretString {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
