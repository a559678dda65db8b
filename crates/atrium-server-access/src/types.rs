// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for request authorization.
//!
//! This module defines the foundational types used throughout the access
//! control system:
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs for catalog entities
//!   ([`PrincipalId`], [`RoleId`], [`PermissionId`]) preventing accidental mixing
//! - **Catalog records**: Read-only snapshots of [`Permission`], [`Role`], and
//!   [`Principal`] as resolved by the catalog layer
//! - **Request/verdict types**: [`AccessRequest`] describing an inbound call and
//!   [`Verdict`] carrying the allow/deny decision
//!
//! All ID types implement transparent serde serialization (as UUID strings) and
//! provide conversion to/from [`uuid::Uuid`]. Records derive serde so that
//! decisions and their inputs can be logged or audited as JSON.

use crate::rule::PathRule;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(PrincipalId, "Unique identifier for a principal.");
define_id_type!(RoleId, "Unique identifier for a role.");
define_id_type!(PermissionId, "Unique identifier for a permission.");

// =============================================================================
// Catalog Records
// =============================================================================

/// A named capability carrying an HTTP method/path matching rule.
///
/// Permissions are read-only snapshots here; their lifecycle (creation,
/// editing, deletion) belongs to the surrounding CRUD layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
	pub id: PermissionId,
	/// Stable name for explicit lookups, unique within the catalog.
	pub slug: String,
	/// Accepted HTTP methods, uppercase. Empty means any method.
	pub methods: Vec<String>,
	/// Parsed path rule. Serializes back to its raw string form.
	pub rule: PathRule,
}

impl Permission {
	/// Create a permission. Methods are normalized to uppercase; the rule
	/// string is parsed once here rather than on every request.
	pub fn new(
		id: PermissionId,
		slug: impl Into<String>,
		methods: &[&str],
		rule: impl Into<PathRule>,
	) -> Self {
		Self {
			id,
			slug: slug.into(),
			methods: methods.iter().map(|m| m.to_ascii_uppercase()).collect(),
			rule: rule.into(),
		}
	}

	/// Returns true if the method list accepts the given method.
	///
	/// An empty list accepts every method. Comparison is case-insensitive.
	pub fn allows_method(&self, method: &str) -> bool {
		self.methods.is_empty() || self.methods.iter().any(|m| m.eq_ignore_ascii_case(method))
	}

	/// Returns true if this permission grants the given request.
	///
	/// A method embedded in the rule replaces the permission's method list
	/// entirely; the list is only consulted for plain-path rules. Paths
	/// compare by exact string equality.
	pub fn matches(&self, request: &AccessRequest) -> bool {
		match &self.rule {
			PathRule::Any => true,
			PathRule::MethodPath { method, path } => {
				request.method.eq_ignore_ascii_case(method) && request.path == *path
			}
			PathRule::Path(path) => request.path == *path && self.allows_method(&request.method),
		}
	}
}

/// A reusable bundle of permissions assignable to many principals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
	pub id: RoleId,
	pub slug: String,
	pub permission_ids: Vec<PermissionId>,
}

impl Role {
	/// Create a role with no permissions.
	pub fn new(id: RoleId, slug: impl Into<String>) -> Self {
		Self {
			id,
			slug: slug.into(),
			permission_ids: Vec::new(),
		}
	}

	/// Builder: grant a permission to this role.
	pub fn with_permission(mut self, permission_id: PermissionId) -> Self {
		self.permission_ids.push(permission_id);
		self
	}
}

/// An authenticated actor whose requests are being authorized.
///
/// Holds references into the catalog: roles the principal is a member of and
/// permissions granted directly, independent of role membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	pub id: PrincipalId,
	pub role_ids: Vec<RoleId>,
	pub permission_ids: Vec<PermissionId>,
}

impl Principal {
	/// Create a principal with no roles or permissions.
	pub fn new(id: PrincipalId) -> Self {
		Self {
			id,
			role_ids: Vec::new(),
			permission_ids: Vec::new(),
		}
	}

	/// Builder: add the principal to a role.
	pub fn with_role(mut self, role_id: RoleId) -> Self {
		self.role_ids.push(role_id);
		self
	}

	/// Builder: grant a permission directly.
	pub fn with_permission(mut self, permission_id: PermissionId) -> Self {
		self.permission_ids.push(permission_id);
		self
	}
}

// =============================================================================
// Request and Verdict
// =============================================================================

/// An inbound (method, path) pair under authorization.
///
/// Constructed per request and discarded after the verdict. The method is
/// normalized to uppercase at construction so every comparison downstream is
/// a plain equality check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequest {
	pub method: String,
	pub path: String,
}

impl AccessRequest {
	/// Create a request, uppercasing the method.
	pub fn new(method: impl AsRef<str>, path: impl Into<String>) -> Self {
		Self {
			method: method.as_ref().to_ascii_uppercase(),
			path: path.into(),
		}
	}
}

impl fmt::Display for AccessRequest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.method, self.path)
	}
}

/// Outcome of an authorization decision.
///
/// `Deny` is a regular return value, not an error; translating it into a
/// response (for example HTTP 403) is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
	Allow,
	Deny,
}

impl Verdict {
	/// Returns true if the request was allowed.
	pub fn is_allow(self) -> bool {
		matches!(self, Verdict::Allow)
	}

	/// Returns true if the request was denied.
	pub fn is_deny(self) -> bool {
		matches!(self, Verdict::Deny)
	}

	/// Convert the verdict into a result for `?` propagation in handlers.
	pub fn require(self) -> Result<(), AccessDenied> {
		match self {
			Verdict::Allow => Ok(()),
			Verdict::Deny => Err(AccessDenied),
		}
	}
}

/// Error returned when a required authorization check did not pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("access denied")]
pub struct AccessDenied;
