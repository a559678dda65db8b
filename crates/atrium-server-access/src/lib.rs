// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request authorization engine for Atrium.
//!
//! Given an authenticated principal and an inbound (method, path) request,
//! this crate decides allow/deny by matching the request against permission
//! rules the principal holds directly or through roles. It also provides the
//! two whitelist gates the routing layer consults before authentication and
//! before authorization, and an explicit slug check for handlers whose
//! decisions cannot be expressed as a static route rule.
//!
//! # Overview
//!
//! - [`rule`]: parsing of stored path-rule strings (`*`, `METHOD:path`, path)
//! - [`catalog`]: the [`PermissionCatalog`] lookup seam and
//!   [`effective_permissions`] (direct ∪ role-derived, deduplicated)
//! - [`engine`]: the pure [`authorize`] and [`has_permission`] decisions
//! - [`whitelist`]: exact-match bypass rules for pipeline stages
//! - [`middleware`]: [`AccessGates`] and [`AccessControlConfig`] for the
//!   request pipeline
//!
//! Storage, authentication, and CRUD management of the underlying records
//! are the surrounding application's concern; everything here is a pure read
//! over injected snapshots and is safe to call concurrently without locking.
//!
//! # Example
//!
//! ```
//! use atrium_server_access::{
//! 	authorize, AccessRequest, InMemoryCatalog, Permission, PermissionId, Principal,
//! 	PrincipalId, Verdict,
//! };
//!
//! let mut catalog = InMemoryCatalog::new();
//! let permission = Permission::new(PermissionId::generate(), "users.index", &["GET"], "/users");
//! let principal = Principal::new(PrincipalId::generate()).with_permission(permission.id);
//! catalog.insert_permission(permission);
//!
//! assert_eq!(
//! 	authorize(&catalog, &principal, &AccessRequest::new("GET", "/users")),
//! 	Verdict::Allow
//! );
//! assert_eq!(
//! 	authorize(&catalog, &principal, &AccessRequest::new("POST", "/users")),
//! 	Verdict::Deny
//! );
//! ```

pub mod catalog;
pub mod engine;
pub mod middleware;
pub mod rule;
pub mod types;
pub mod whitelist;

pub use catalog::{effective_permissions, InMemoryCatalog, PermissionCatalog};
pub use engine::{authorize, has_permission};
pub use middleware::{AccessControlConfig, AccessGates};
pub use rule::PathRule;
pub use types::{
	AccessDenied, AccessRequest, Permission, PermissionId, Principal, PrincipalId, Role, RoleId,
	Verdict,
};
pub use whitelist::{Whitelist, WhitelistRule};
