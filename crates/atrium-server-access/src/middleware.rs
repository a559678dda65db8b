// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request-pipeline gates for the authorization engine.
//!
//! This module provides:
//! - [`AccessControlConfig`] - the two whitelist entry lists, owned by the
//!   surrounding configuration layer
//! - [`AccessGates`] - the compiled gates a routing layer consults per request
//!
//! # Request Flow
//!
//! ```text
//! Request → Gate A (auth whitelist) ──matched──→ handler (no credentials)
//!               │
//!          credential check (external) → Principal
//!               │
//!           Gate B (permission whitelist) ──matched──→ handler
//!               │
//!           authorize(catalog, principal, request) → Allow | Deny
//! ```
//!
//! The two lists are deliberately separate: Gate A admits unauthenticated
//! traffic (public bootstrap endpoints), while Gate B still requires a
//! resolved principal and only skips the fine-grained permission match
//! (self-service endpoints identical for every signed-in principal). Merging
//! them would either over-expose or over-restrict one of the two kinds.
//!
//! Verdicts are returned upward as values; translating a deny into a
//! transport-level response is the routing layer's job.

use crate::catalog::PermissionCatalog;
use crate::engine;
use crate::types::{AccessRequest, Principal, Verdict};
use crate::whitelist::Whitelist;
use http::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whitelist configuration for the two pipeline gates.
///
/// Entries are `path` or `METHOD:path` strings (method token in any case).
/// Loaded once at startup and treated as immutable for the process lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessControlConfig {
	/// Requests matching these entries skip credential verification entirely.
	pub auth_whitelist: Vec<String>,
	/// Requests matching these entries skip the permission match; the
	/// principal must still be authenticated.
	pub permission_whitelist: Vec<String>,
}

impl AccessControlConfig {
	/// Create an empty configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder: set the authentication-bypass entries.
	pub fn with_auth_whitelist<I, S>(mut self, entries: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.auth_whitelist = entries.into_iter().map(Into::into).collect();
		self
	}

	/// Builder: set the permission-bypass entries.
	pub fn with_permission_whitelist<I, S>(mut self, entries: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.permission_whitelist = entries.into_iter().map(Into::into).collect();
		self
	}
}

/// Compiled pipeline gates; cheap to clone and safe to share across workers.
#[derive(Debug, Clone, Default)]
pub struct AccessGates {
	auth_bypass: Whitelist,
	permission_bypass: Whitelist,
}

impl AccessGates {
	/// Build gates from already-parsed whitelists.
	pub fn new(auth_bypass: Whitelist, permission_bypass: Whitelist) -> Self {
		Self {
			auth_bypass,
			permission_bypass,
		}
	}

	/// Build gates from configuration entries.
	pub fn from_config(config: &AccessControlConfig) -> Self {
		Self {
			auth_bypass: Whitelist::from_entries(&config.auth_whitelist),
			permission_bypass: Whitelist::from_entries(&config.permission_whitelist),
		}
	}

	/// Gate A: should this request skip credential verification?
	pub fn should_bypass_auth(&self, method: &Method, path: &str) -> bool {
		let request = AccessRequest::new(method.as_str(), path);
		let bypass = self.auth_bypass.matches(&request);
		if bypass {
			debug!(%request, "authentication bypassed by whitelist");
		}
		bypass
	}

	/// Gate B: should this request skip the permission match?
	///
	/// The principal must already be authenticated when this gate passes;
	/// only the fine-grained permission decision is skipped.
	pub fn should_bypass_permission(&self, method: &Method, path: &str) -> bool {
		let request = AccessRequest::new(method.as_str(), path);
		let bypass = self.permission_bypass.matches(&request);
		if bypass {
			debug!(%request, "permission check bypassed by whitelist");
		}
		bypass
	}

	/// Run Gate B and, when it does not match, the full permission match.
	pub fn authorize_request<C>(
		&self,
		catalog: &C,
		principal: &Principal,
		request: &AccessRequest,
	) -> Verdict
	where
		C: PermissionCatalog + ?Sized,
	{
		if self.permission_bypass.matches(request) {
			debug!(%request, "permission check bypassed by whitelist");
			return Verdict::Allow;
		}
		engine::authorize(catalog, principal, request)
	}
}
