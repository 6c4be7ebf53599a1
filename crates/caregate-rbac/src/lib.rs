//! # caregate-rbac: Role Permission Table
//!
//! The canonical role → module → action grant table for CareGate:
//! - **Typed matrix** — built-in roles are a closed enum with a guaranteed
//!   entry each; custom roles live in a separate name-keyed map
//! - **Fail-closed lookups** — unknown role, absent module, or absent action
//!   always answer "denied", never panic
//! - **Wholesale replacement** — the admin flow replaces whole role entries;
//!   the table is read-mostly session configuration
//!
//! ## Defaults
//!
//! | Role            | patients | appointments | billing | crm  | ehr | reports | admin |
//! |-----------------|----------|--------------|---------|------|-----|---------|-------|
//! | admin           | VCED     | VCED         | VCEP    | VCED | VCE | VX      | URPS  |
//! | doctor          | VCED     | VCED         | —       | —    | VCE | VX      | —     |
//! | patient         | —        | VC           | —       | —    | V   | —       | —     |
//! | nurse           | VCE      | VCE          | —       | —    | VCE | —       | —     |
//! | receptionist    | VCE      | VCE          | —       | —    | —   | —       | —     |
//! | billing_manager | V        | —            | VCEP    | —    | —   | VX      | —     |
//! | crm_manager     | —        | —            | —       | VCED | —   | VX      | —     |
//! | staff           | V        | V            | —       | —    | —   | —       | —     |
//!
//! (V=view, C=create, E=edit, D=delete, P=process, X=export,
//! URPS=users/roles/plans/settings)
//!
//! ## Examples
//!
//! ```
//! use caregate_rbac::PermissionMatrix;
//! use caregate_types::{Action, PermissionModule, Role, RoleId};
//!
//! let matrix = PermissionMatrix::defaults();
//! let doctor = RoleId::Builtin(Role::Doctor);
//!
//! assert!(matrix.permits(&doctor, PermissionModule::Ehr, Action::Edit));
//! assert!(!matrix.permits(&doctor, PermissionModule::Billing, Action::View));
//! ```

pub mod defaults;
pub mod matrix;
pub mod permissions;
pub mod wire;

// Re-export commonly used types
pub use matrix::{MatrixError, PermissionMatrix};
pub use permissions::RoleGrants;
pub use wire::{RawPermissionTable, RawRoleGrants};
