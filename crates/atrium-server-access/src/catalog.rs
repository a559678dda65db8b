// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Catalog lookups and effective-permission resolution.
//!
//! The engine never talks to storage directly. It reads role and permission
//! snapshots through the [`PermissionCatalog`] trait, which the surrounding
//! application implements over its store of record. [`effective_permissions`]
//! folds a principal's direct grants and role-derived grants into one
//! deduplicated set.
//!
//! Dangling references (a role or permission id that no longer resolves) are
//! skipped rather than surfaced: authorization must degrade toward deny, not
//! crash mid-request.

use crate::types::{Permission, PermissionId, Principal, Role, RoleId};
use std::collections::{HashMap, HashSet};

/// Read access to role and permission records.
///
/// Implementations return owned snapshots; the engine holds no references
/// into the store and performs no mutation. Retry and timeout policy for a
/// remote store belongs to the implementer, not the engine.
pub trait PermissionCatalog {
	/// Resolve a role by id, if it exists.
	fn role(&self, id: RoleId) -> Option<Role>;

	/// Resolve a permission by id, if it exists.
	fn permission(&self, id: PermissionId) -> Option<Permission>;
}

/// Compute the effective permission set for a principal.
///
/// The result is the union, by permission id, of the principal's direct
/// grants and the grants of every role the principal holds. A permission
/// granted through several paths appears once. Output order carries no
/// meaning; matching downstream is order-independent.
pub fn effective_permissions<C>(catalog: &C, principal: &Principal) -> Vec<Permission>
where
	C: PermissionCatalog + ?Sized,
{
	let mut seen = HashSet::new();
	let mut permissions = Vec::new();

	let mut collect = |id: PermissionId| {
		if seen.insert(id) {
			if let Some(permission) = catalog.permission(id) {
				permissions.push(permission);
			}
		}
	};

	for &id in &principal.permission_ids {
		collect(id);
	}

	for &role_id in &principal.role_ids {
		if let Some(role) = catalog.role(role_id) {
			for &id in &role.permission_ids {
				collect(id);
			}
		}
	}

	permissions
}

/// Map-backed catalog for tests and embedded deployments.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
	roles: HashMap<RoleId, Role>,
	permissions: HashMap<PermissionId, Permission>,
}

impl InMemoryCatalog {
	/// Create an empty catalog.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or replace a role.
	pub fn insert_role(&mut self, role: Role) {
		self.roles.insert(role.id, role);
	}

	/// Insert or replace a permission.
	pub fn insert_permission(&mut self, permission: Permission) {
		self.permissions.insert(permission.id, permission);
	}
}

impl PermissionCatalog for InMemoryCatalog {
	fn role(&self, id: RoleId) -> Option<Role> {
		self.roles.get(&id).cloned()
	}

	fn permission(&self, id: PermissionId) -> Option<Permission> {
		self.permissions.get(&id).cloned()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn permission(slug: &str) -> Permission {
		Permission::new(PermissionId::generate(), slug, &["GET"], "/test")
	}

	#[test]
	fn empty_principal_has_empty_effective_set() {
		let catalog = InMemoryCatalog::new();
		let principal = Principal::new(crate::PrincipalId::generate());
		assert!(effective_permissions(&catalog, &principal).is_empty());
	}

	#[test]
	fn direct_grants_are_resolved() {
		let mut catalog = InMemoryCatalog::new();
		let permission = permission("users.index");
		let principal = Principal::new(crate::PrincipalId::generate()).with_permission(permission.id);
		catalog.insert_permission(permission.clone());

		assert_eq!(effective_permissions(&catalog, &principal), vec![permission]);
	}

	#[test]
	fn role_grants_are_resolved() {
		let mut catalog = InMemoryCatalog::new();
		let permission = permission("users.index");
		let role = Role::new(RoleId::generate(), "editor").with_permission(permission.id);
		let principal = Principal::new(crate::PrincipalId::generate()).with_role(role.id);
		catalog.insert_permission(permission.clone());
		catalog.insert_role(role);

		assert_eq!(effective_permissions(&catalog, &principal), vec![permission]);
	}

	#[test]
	fn duplicate_grants_appear_once() {
		let mut catalog = InMemoryCatalog::new();
		let permission = permission("users.index");
		let role_a = Role::new(RoleId::generate(), "editor").with_permission(permission.id);
		let role_b = Role::new(RoleId::generate(), "admin").with_permission(permission.id);
		let principal = Principal::new(crate::PrincipalId::generate())
			.with_role(role_a.id)
			.with_role(role_b.id)
			.with_permission(permission.id);
		catalog.insert_permission(permission.clone());
		catalog.insert_role(role_a);
		catalog.insert_role(role_b);

		assert_eq!(effective_permissions(&catalog, &principal), vec![permission]);
	}

	#[test]
	fn dangling_role_id_is_skipped() {
		let mut catalog = InMemoryCatalog::new();
		let permission = permission("users.index");
		let principal = Principal::new(crate::PrincipalId::generate())
			.with_role(RoleId::generate())
			.with_permission(permission.id);
		catalog.insert_permission(permission.clone());

		assert_eq!(effective_permissions(&catalog, &principal), vec![permission]);
	}

	#[test]
	fn dangling_permission_id_is_skipped() {
		let mut catalog = InMemoryCatalog::new();
		let permission = permission("users.index");
		let role = Role::new(RoleId::generate(), "editor")
			.with_permission(PermissionId::generate())
			.with_permission(permission.id);
		let principal = Principal::new(crate::PrincipalId::generate())
			.with_role(role.id)
			.with_permission(PermissionId::generate());
		catalog.insert_permission(permission.clone());
		catalog.insert_role(role);

		assert_eq!(effective_permissions(&catalog, &principal), vec![permission]);
	}
}
