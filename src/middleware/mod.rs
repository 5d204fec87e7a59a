pub mod auth;

pub use auth::{check_permission, PermissionGuard};
