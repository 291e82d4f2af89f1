// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Repository identifiers and their storage encoding.
//!
//! Identifiers are stored as normalized keys. The encoding keeps ASCII
//! letters and digits, maps `-` to `_`, and writes every other byte as `$`
//! followed by two uppercase hex digits. `_` therefore only ever stands for
//! `-`, which keeps the encoding prefix-free and reversible.

use std::fmt::{self, Write};

use crate::error::{MetricsError, Result};

/// Longest owner (user or organization) login accepted upstream.
pub const MAX_OWNER_LEN: usize = 39;

/// Longest repository name accepted upstream.
pub const MAX_NAME_LEN: usize = 100;

/// A validated `(owner, name)` repository identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
	owner: String,
	name: String,
}

/// Storage form of a [`RepoId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedRepoId {
	pub owner_key: String,
	pub repo_key: String,
}

impl RepoId {
	/// Validate and build an identifier.
	///
	/// Both parts must be non-empty and use only ASCII letters, digits,
	/// `-`, `_` and `.`.
	pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
		let owner = owner.into();
		let name = name.into();
		validate_part("owner", &owner, MAX_OWNER_LEN)?;
		validate_part("repository", &name, MAX_NAME_LEN)?;
		Ok(Self { owner, name })
	}

	/// Rebuild an identifier from its normalized storage keys.
	pub fn from_normalized(owner_key: &str, repo_key: &str) -> Result<Self> {
		Self::new(denormalize(owner_key)?, denormalize(repo_key)?)
	}

	pub fn owner(&self) -> &str {
		&self.owner
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn normalized(&self) -> NormalizedRepoId {
		NormalizedRepoId {
			owner_key: normalize(&self.owner),
			repo_key: normalize(&self.name),
		}
	}
}

impl fmt::Display for RepoId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.owner, self.name)
	}
}

fn validate_part(kind: &str, value: &str, max_len: usize) -> Result<()> {
	if value.is_empty() {
		return Err(MetricsError::InvalidRepository(format!("{kind} must not be empty")));
	}
	if value.len() > max_len {
		return Err(MetricsError::InvalidRepository(format!(
			"{kind} '{value}' exceeds {max_len} characters"
		)));
	}
	if value == "." || value == ".." {
		return Err(MetricsError::InvalidRepository(format!(
			"{kind} '{value}' is reserved"
		)));
	}
	if let Some(c) = value
		.chars()
		.find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
	{
		return Err(MetricsError::InvalidRepository(format!(
			"{kind} '{value}' contains invalid character '{c}'"
		)));
	}
	Ok(())
}

/// Encode one identifier part into its storage key.
pub fn normalize(part: &str) -> String {
	let mut key = String::with_capacity(part.len());
	for byte in part.bytes() {
		match byte {
			b'-' => key.push('_'),
			b if b.is_ascii_alphanumeric() => key.push(b as char),
			b => {
				// Writing into a String cannot fail.
				let _ = write!(key, "${b:02X}");
			}
		}
	}
	key
}

/// Decode a storage key back into the identifier part it was built from.
pub fn denormalize(key: &str) -> Result<String> {
	let bytes = key.as_bytes();
	let mut out = Vec::with_capacity(bytes.len());
	let mut i = 0;
	while i < bytes.len() {
		match bytes[i] {
			b'_' => {
				out.push(b'-');
				i += 1;
			}
			b'$' => {
				// Only the exact form `normalize` emits: two uppercase hex
				// digits for a byte that is not written literally.
				let decoded = match bytes.get(i + 1..i + 3) {
					Some(&[hi, lo]) => upper_hex(hi).zip(upper_hex(lo)).map(|(h, l)| (h << 4) | l),
					_ => None,
				}
				.filter(|b| !(b.is_ascii_alphanumeric() || *b == b'-'))
				.ok_or_else(|| MetricsError::MalformedKey(key.to_string()))?;
				out.push(decoded);
				i += 3;
			}
			b if b.is_ascii_alphanumeric() => {
				out.push(b);
				i += 1;
			}
			_ => return Err(MetricsError::MalformedKey(key.to_string())),
		}
	}
	String::from_utf8(out).map_err(|_| MetricsError::MalformedKey(key.to_string()))
}

fn upper_hex(digit: u8) -> Option<u8> {
	match digit {
		b'0'..=b'9' => Some(digit - b'0'),
		b'A'..=b'F' => Some(digit - b'A' + 10),
		_ => None,
	}
}
