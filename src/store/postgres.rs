use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::{NewUser, User, UserPermissions, UserStore};
use crate::permissions::PermissionFlag;

macro_rules! user_columns {
    () => {
        "id, email, password_hash, name, pic, intro, ref_rank, dob, country, location, \
         created_at, updated_at, deleted_at"
    };
}

macro_rules! permission_columns {
    () => {
        "id, email, user_deactivated, banned_from_commenting, banned_from_posting, \
         banned_from_analytix, created_at, updated_at"
    };
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user_with_permissions(&self, new_user: NewUser) -> anyhow::Result<User> {
        let mut tx = self.db.begin().await.context("begin tx")?;

        let user = sqlx::query_as::<_, User>(concat!(
            r#"
            INSERT INTO users (email, password_hash, name, pic, intro, ref_rank, dob, country, location)
            VALUES ($1, $2, $3, $4, $5, 0, $6, $7, $8)
            RETURNING "#,
            user_columns!()
        ))
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.name)
        .bind(&new_user.pic)
        .bind(&new_user.intro)
        .bind(new_user.dob)
        .bind(&new_user.country)
        .bind(&new_user.location)
        .fetch_one(&mut *tx)
        .await
        .context("insert user")?;

        sqlx::query(
            r#"
            INSERT INTO user_permissions (email)
            VALUES ($1)
            "#,
        )
        .bind(&user.email)
        .execute(&mut *tx)
        .await
        .context("insert user permissions")?;

        tx.commit().await.context("commit tx")?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM users WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn update_country_and_location(
        &self,
        id: i64,
        country: &str,
        location: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(concat!(
            r#"
            UPDATE users
               SET country = $2, location = $3, updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
            RETURNING "#,
            user_columns!()
        ))
        .bind(id)
        .bind(country)
        .bind(location)
        .fetch_optional(&self.db)
        .await
        .context("update country and location")?;
        Ok(user)
    }

    async fn list_users_in_location(
        &self,
        location: &str,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(concat!(
            "SELECT ",
            user_columns!(),
            r#"
              FROM users
             WHERE location = $1 AND deleted_at IS NULL
             ORDER BY id ASC
             LIMIT $2 OFFSET $3
            "#
        ))
        .bind(location)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("list users in location")?;
        Ok(rows)
    }

    async fn search_candidates(&self, location: Option<&str>) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(concat!(
            "SELECT ",
            user_columns!(),
            r#"
              FROM users
             WHERE deleted_at IS NULL
               AND ($1::TEXT IS NULL OR location = $1)
             ORDER BY id ASC
            "#
        ))
        .bind(location)
        .fetch_all(&self.db)
        .await
        .context("list search candidates")?;
        Ok(rows)
    }

    async fn soft_delete_user(&self, email: &str) -> anyhow::Result<bool> {
        let mut tx = self.db.begin().await.context("begin tx")?;

        let deleted = sqlx::query(
            r#"
            UPDATE users
               SET deleted_at = now()
             WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .execute(&mut *tx)
        .await
        .context("soft delete user")?
        .rows_affected();

        sqlx::query("DELETE FROM user_permissions WHERE email = $1")
            .bind(email)
            .execute(&mut *tx)
            .await
            .context("delete user permissions")?;

        tx.commit().await.context("commit tx")?;
        Ok(deleted > 0)
    }

    async fn increment_referrals(&self, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(concat!(
            r#"
            UPDATE users
               SET ref_rank = ref_rank + 1, updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
            RETURNING "#,
            user_columns!()
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("increment referrals")?;
        Ok(user)
    }

    async fn find_permissions(&self, email: &str) -> anyhow::Result<Option<UserPermissions>> {
        let row = sqlx::query_as::<_, UserPermissions>(concat!(
            "SELECT ",
            permission_columns!(),
            " FROM user_permissions WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user permissions")?;
        Ok(row)
    }

    async fn set_permission_flag(
        &self,
        email: &str,
        flag: PermissionFlag,
        value: bool,
    ) -> anyhow::Result<Option<UserPermissions>> {
        let mut tx = self.db.begin().await.context("begin tx")?;

        let Some(mut perms) = sqlx::query_as::<_, UserPermissions>(concat!(
            "SELECT ",
            permission_columns!(),
            " FROM user_permissions WHERE email = $1 FOR UPDATE"
        ))
        .bind(email)
        .fetch_optional(&mut *tx)
        .await
        .context("lock user permissions")?
        else {
            return Ok(None);
        };

        flag.apply(&mut perms, value);

        let perms = sqlx::query_as::<_, UserPermissions>(concat!(
            r#"
            UPDATE user_permissions
               SET user_deactivated = $2,
                   banned_from_commenting = $3,
                   banned_from_posting = $4,
                   banned_from_analytix = $5,
                   updated_at = now()
             WHERE id = $1
            RETURNING "#,
            permission_columns!()
        ))
        .bind(perms.id)
        .bind(perms.user_deactivated)
        .bind(perms.banned_from_commenting)
        .bind(perms.banned_from_posting)
        .bind(perms.banned_from_analytix)
        .fetch_one(&mut *tx)
        .await
        .context("update user permissions")?;

        tx.commit().await.context("commit tx")?;
        Ok(Some(perms))
    }
}
