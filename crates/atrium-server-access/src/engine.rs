// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization decision functions.
//!
//! This module contains the core [`authorize`] function that evaluates a
//! request against a principal's effective permission set, and
//! [`has_permission`], the explicit slug check handlers can call when a
//! decision cannot be expressed as a static method/path rule.
//!
//! Both are pure functions over their inputs: no side effects, no mutation,
//! safe to call from any number of request-handling threads concurrently. A
//! decision is an existential OR over the effective set, so iteration order
//! never affects the outcome.

use crate::catalog::{effective_permissions, PermissionCatalog};
use crate::types::{AccessRequest, Principal, Verdict};
use tracing::{debug, instrument};

/// Evaluate whether a principal may perform the given request.
///
/// Computes the principal's effective permission set and returns
/// [`Verdict::Allow`] as soon as any permission matches the request's method
/// and path. No match means [`Verdict::Deny`]. This function never errors;
/// an unresolvable reference in the catalog only shrinks the effective set.
///
/// # Tracing
///
/// Instrumented at debug level; the matched permission (or the deny) is
/// logged with the request attributes for audit purposes.
#[instrument(
	level = "debug",
	skip(catalog, principal),
	fields(principal_id = %principal.id)
)]
pub fn authorize<C>(catalog: &C, principal: &Principal, request: &AccessRequest) -> Verdict
where
	C: PermissionCatalog + ?Sized,
{
	for permission in effective_permissions(catalog, principal) {
		if permission.matches(request) {
			debug!(
				permission_id = %permission.id,
				slug = %permission.slug,
				"request allowed"
			);
			return Verdict::Allow;
		}
	}

	debug!("no permission matched");
	Verdict::Deny
}

/// Test whether a principal holds a permission by slug.
///
/// Membership is by slug equality over the effective set; the permission's
/// method/path rule is not consulted. Extra arguments are accepted so call
/// sites can forward contextual parameters (for example resource
/// identifiers); they are reserved for richer checks and do not affect the
/// result today.
#[instrument(level = "debug", skip_all, fields(principal_id = %principal.id, slug = slug))]
pub fn has_permission<C>(catalog: &C, principal: &Principal, slug: &str, _args: &[&str]) -> bool
where
	C: PermissionCatalog + ?Sized,
{
	let held = effective_permissions(catalog, principal)
		.iter()
		.any(|permission| permission.slug == slug);
	debug!(held, "slug check");
	held
}
