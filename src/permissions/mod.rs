mod dto;
pub mod handlers;

use crate::{state::AppState, store::UserPermissions};
use axum::Router;

pub use dto::AlterPermissionsRequest;

pub fn router() -> Router<AppState> {
    handlers::permission_routes()
}

/// One of the independently switchable permission flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionFlag {
    Deactivation,
    Commenting,
    Posting,
    Analytics,
}

impl PermissionFlag {
    /// The value the request asks this flag to take.
    pub fn requested(self, req: &AlterPermissionsRequest) -> bool {
        match self {
            PermissionFlag::Deactivation => req.user_deactivated,
            PermissionFlag::Commenting => req.banned_from_commenting,
            PermissionFlag::Posting => req.banned_from_posting,
            PermissionFlag::Analytics => req.banned_from_analytix,
        }
    }

    pub fn get(self, perms: &UserPermissions) -> bool {
        match self {
            PermissionFlag::Deactivation => perms.user_deactivated,
            PermissionFlag::Commenting => perms.banned_from_commenting,
            PermissionFlag::Posting => perms.banned_from_posting,
            PermissionFlag::Analytics => perms.banned_from_analytix,
        }
    }

    pub fn apply(self, perms: &mut UserPermissions, value: bool) {
        let slot = match self {
            PermissionFlag::Deactivation => &mut perms.user_deactivated,
            PermissionFlag::Commenting => &mut perms.banned_from_commenting,
            PermissionFlag::Posting => &mut perms.banned_from_posting,
            PermissionFlag::Analytics => &mut perms.banned_from_analytix,
        };
        *slot = value;
    }
}
