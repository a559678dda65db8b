// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Whitelist rules exempting requests from a pipeline stage.
//!
//! A whitelist entry is either a bare path (`/configs/basic/values`), which
//! matches that path under any method, or `METHOD:path`
//! (`get:/test-resources/pass-through`), which matches only that method. The
//! method token is accepted in any case and compared case-insensitively;
//! paths compare by exact string equality.
//!
//! Lists are loaded once at configuration time and read-only afterwards, so
//! concurrent matching needs no locking.

use crate::types::AccessRequest;

/// A single whitelist entry: an exact path, optionally pinned to one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistRule {
	method: Option<String>,
	path: String,
}

impl WhitelistRule {
	/// Parse an entry string. Total; an entry without a leading method token
	/// is an any-method path rule.
	pub fn parse(entry: &str) -> Self {
		if let Some((method, path)) = entry.split_once(':') {
			if !method.is_empty() && method.bytes().all(|b| b.is_ascii_alphabetic()) {
				return Self {
					method: Some(method.to_ascii_uppercase()),
					path: path.to_string(),
				};
			}
		}
		Self {
			method: None,
			path: entry.to_string(),
		}
	}

	/// The method this rule is pinned to, if any.
	pub fn method(&self) -> Option<&str> {
		self.method.as_deref()
	}

	/// The exact path this rule matches.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns true if the rule matches the request.
	pub fn matches(&self, request: &AccessRequest) -> bool {
		if self.path != request.path {
			return false;
		}
		match &self.method {
			Some(method) => request.method.eq_ignore_ascii_case(method),
			None => true,
		}
	}
}

/// An ordered list of whitelist rules; a request matches if any rule does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
	rules: Vec<WhitelistRule>,
}

impl Whitelist {
	/// Create a whitelist from already-parsed rules.
	pub fn new(rules: Vec<WhitelistRule>) -> Self {
		Self { rules }
	}

	/// Parse a whitelist from entry strings.
	pub fn from_entries<I, S>(entries: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self {
			rules: entries
				.into_iter()
				.map(|entry| WhitelistRule::parse(entry.as_ref()))
				.collect(),
		}
	}

	/// Returns true if any rule matches the request.
	pub fn matches(&self, request: &AccessRequest) -> bool {
		self.rules.iter().any(|rule| rule.matches(request))
	}

	/// The parsed rules, in configuration order.
	pub fn rules(&self) -> &[WhitelistRule] {
		&self.rules
	}

	/// Returns true if the list holds no rules.
	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}
}
