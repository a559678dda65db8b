// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Parsing of stored permission path-rule strings.
//!
//! A permission's rule string takes one of three forms:
//!
//! - `*` - matches any method and any path
//! - `METHOD:path` - an uppercase HTTP method token, a literal colon, then a
//!   path; matches only that method/path pair and replaces the permission's
//!   separate method list
//! - anything else - an exact path; method acceptance falls back to the
//!   permission's method list
//!
//! Parsing is total: a string that fits no recognized form is kept as an
//! exact path, so a malformed rule simply fails to match rather than aborting
//! the decision.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Parsed form of a permission's path rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PathRule {
	/// `*`: any method, any path.
	Any,
	/// `METHOD:path`: a single method/path pair. The method here overrides
	/// the permission's method list entirely.
	MethodPath { method: String, path: String },
	/// An exact path; methods are checked against the permission's list.
	Path(String),
}

impl PathRule {
	/// Parse a raw rule string. Total; never fails.
	pub fn parse(raw: &str) -> Self {
		if raw == "*" {
			return PathRule::Any;
		}
		if let Some((method, path)) = raw.split_once(':') {
			// Only an uppercase ASCII method token before the first colon
			// makes an embedded-method rule. Anything else is a path.
			if !method.is_empty() && method.bytes().all(|b| b.is_ascii_uppercase()) {
				return PathRule::MethodPath {
					method: method.to_string(),
					path: path.to_string(),
				};
			}
		}
		PathRule::Path(raw.to_string())
	}
}

impl From<&str> for PathRule {
	fn from(raw: &str) -> Self {
		PathRule::parse(raw)
	}
}

impl From<String> for PathRule {
	fn from(raw: String) -> Self {
		PathRule::parse(&raw)
	}
}

impl FromStr for PathRule {
	type Err = Infallible;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		Ok(PathRule::parse(raw))
	}
}

impl fmt::Display for PathRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PathRule::Any => f.write_str("*"),
			PathRule::MethodPath { method, path } => write!(f, "{method}:{path}"),
			PathRule::Path(path) => f.write_str(path),
		}
	}
}

impl From<PathRule> for String {
	fn from(rule: PathRule) -> Self {
		rule.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn star_parses_as_any() {
		assert_eq!(PathRule::parse("*"), PathRule::Any);
	}

	#[test]
	fn uppercase_method_prefix_parses_as_method_path() {
		assert_eq!(
			PathRule::parse("POST:/users"),
			PathRule::MethodPath {
				method: "POST".to_string(),
				path: "/users".to_string(),
			}
		);
	}

	#[test]
	fn splits_on_first_colon_only() {
		assert_eq!(
			PathRule::parse("GET:/users:archive"),
			PathRule::MethodPath {
				method: "GET".to_string(),
				path: "/users:archive".to_string(),
			}
		);
	}

	#[test]
	fn plain_path_parses_as_path() {
		assert_eq!(PathRule::parse("/users"), PathRule::Path("/users".to_string()));
	}

	#[test]
	fn lowercase_method_prefix_stays_a_path() {
		assert_eq!(
			PathRule::parse("post:/users"),
			PathRule::Path("post:/users".to_string())
		);
	}

	#[test]
	fn non_alphabetic_prefix_stays_a_path() {
		assert_eq!(
			PathRule::parse("HTTP2:/users"),
			PathRule::Path("HTTP2:/users".to_string())
		);
	}

	#[test]
	fn leading_colon_stays_a_path() {
		assert_eq!(PathRule::parse(":/users"), PathRule::Path(":/users".to_string()));
	}

	#[test]
	fn empty_string_is_an_empty_path() {
		assert_eq!(PathRule::parse(""), PathRule::Path(String::new()));
	}

	#[test]
	fn display_round_trips() {
		for raw in ["*", "POST:/users", "/users", "post:/users", ""] {
			let rule = PathRule::parse(raw);
			assert_eq!(rule.to_string(), raw);
			assert_eq!(PathRule::parse(&rule.to_string()), rule);
		}
	}

	#[test]
	fn serde_round_trips_through_raw_string() {
		let rule = PathRule::parse("DELETE:/users/1");
		let json = serde_json::to_string(&rule).unwrap();
		assert_eq!(json, "\"DELETE:/users/1\"");
		assert_eq!(serde_json::from_str::<PathRule>(&json).unwrap(), rule);
	}
}
