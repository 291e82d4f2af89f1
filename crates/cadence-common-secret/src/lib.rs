// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential wrapper for upstream access tokens.
//!
//! A [`SecretString`] prints as `[REDACTED]` through `Debug`, `Display` and
//! `Serialize`, is wiped from memory when dropped, and only hands out the
//! raw value through [`SecretString::expose`].
//!
//! ```
//! use cadence_common_secret::SecretString;
//!
//! let token = SecretString::new("ghp_example");
//! assert_eq!(format!("{token:?}"), "SecretString(\"[REDACTED]\")");
//! assert_eq!(token.expose(), "ghp_example");
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Placeholder printed in place of a secret.
pub const REDACTED: &str = "[REDACTED]";

#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Wrap `value` unless it is empty.
	pub fn non_empty(value: impl Into<String>) -> Option<Self> {
		let value = value.into();
		(!value.is_empty()).then(|| Self(value))
	}

	/// Access the raw value. Keep call sites to the point of use.
	pub fn expose(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SecretString").field(&REDACTED).finish()
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl Serialize for SecretString {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(REDACTED)
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		String::deserialize(deserializer).map(Self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_formatting_is_redacted() {
		let token = SecretString::new("ghp_hidden");
		assert_eq!(format!("{token}"), REDACTED);
		assert_eq!(format!("{token:?}"), "SecretString(\"[REDACTED]\")");
		assert_eq!(format!("{:?}", Some(token)), "Some(SecretString(\"[REDACTED]\"))");
	}

	#[test]
	fn test_expose_returns_value() {
		assert_eq!(SecretString::from("ghp_hidden").expose(), "ghp_hidden");
	}

	#[test]
	fn test_non_empty_drops_blank_values() {
		assert!(SecretString::non_empty("").is_none());
		assert_eq!(
			SecretString::non_empty("ghp_x").map(|s| s.expose().to_string()),
			Some("ghp_x".to_string())
		);
	}

	#[test]
	fn test_zeroize_clears_value() {
		let mut token = SecretString::new("ghp_hidden");
		token.zeroize();
		assert!(token.is_empty());
	}

	#[test]
	fn test_serialize_is_redacted() {
		let json = serde_json::to_string(&SecretString::new("ghp_hidden")).unwrap();
		assert_eq!(json, "\"[REDACTED]\"");
	}

	#[test]
	fn test_deserializes_from_toml() {
		#[derive(Deserialize)]
		struct Section {
			token: SecretString,
		}

		let section: Section = toml::from_str("token = \"ghp_from_file\"").unwrap();
		assert_eq!(section.token.expose(), "ghp_from_file");
	}

	proptest! {
		#[test]
		fn debug_never_contains_value(value in "[a-z0-9_]{12,40}") {
			let token = SecretString::new(value.clone());
			let debug = format!("{token:?}");
			let display = format!("{token}");
			prop_assert!(!debug.contains(&value));
			prop_assert!(!display.contains(&value));
		}
	}
}
