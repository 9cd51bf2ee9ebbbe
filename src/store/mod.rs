//! Persistence boundary for user and permission records.
//!
//! Every lookup that returns a `User` ignores soft-deleted rows.

use async_trait::async_trait;

use crate::permissions::PermissionFlag;

#[cfg(test)]
pub mod memory;
pub mod postgres;
mod types;

pub use postgres::PgUserStore;
pub use types::{NewUser, User, UserPermissions};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts the user and its permissions row as one unit; on failure neither exists.
    async fn create_user_with_permissions(&self, new_user: NewUser) -> anyhow::Result<User>;

    async fn find_user_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    async fn update_country_and_location(
        &self,
        id: i64,
        country: &str,
        location: &str,
    ) -> anyhow::Result<Option<User>>;

    async fn list_users_in_location(
        &self,
        location: &str,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<User>>;

    /// All live users, or only those in `location` when given.
    async fn search_candidates(&self, location: Option<&str>) -> anyhow::Result<Vec<User>>;

    /// Soft-deletes the user and removes its permissions row. Returns whether a live user matched.
    async fn soft_delete_user(&self, email: &str) -> anyhow::Result<bool>;

    async fn increment_referrals(&self, id: i64) -> anyhow::Result<Option<User>>;

    async fn find_permissions(&self, email: &str) -> anyhow::Result<Option<UserPermissions>>;

    async fn set_permission_flag(
        &self,
        email: &str,
        flag: PermissionFlag,
        value: bool,
    ) -> anyhow::Result<Option<UserPermissions>>;
}
