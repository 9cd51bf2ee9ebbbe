use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use async_trait::async_trait;
use time::OffsetDateTime;

use super::{NewUser, User, UserPermissions, UserStore};
use crate::permissions::PermissionFlag;

#[derive(Debug, Clone, Default)]
struct Tables {
    users: Vec<User>,
    permissions: Vec<UserPermissions>,
    next_user_id: i64,
    next_permissions_id: i64,
}

/// In-process store for tests, with switches to simulate store failures.
#[derive(Default)]
pub struct MemoryUserStore {
    tables: Mutex<Tables>,
    fail_permissions_insert: AtomicBool,
    fail_lookups: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_permissions_insert(&self, fail: bool) {
        self.fail_permissions_insert.store(fail, Ordering::SeqCst);
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    /// Row count including soft-deleted users.
    pub fn user_rows(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn permission_rows(&self) -> usize {
        self.tables.lock().unwrap().permissions.len()
    }

    fn check_lookup(&self) -> anyhow::Result<()> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            anyhow::bail!("simulated store outage");
        }
        Ok(())
    }

    fn live_user_mut(tables: &mut Tables, id: i64) -> Option<&mut User> {
        tables
            .users
            .iter_mut()
            .find(|u| u.id == id && u.deleted_at.is_none())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user_with_permissions(&self, new_user: NewUser) -> anyhow::Result<User> {
        let mut tables = self.tables.lock().unwrap();
        // stage on a copy; only a fully successful unit replaces the tables
        let mut staged = tables.clone();

        if staged.users.iter().any(|u| u.email == new_user.email) {
            anyhow::bail!("duplicate key value violates unique constraint \"users_email_key\"");
        }

        let now = OffsetDateTime::now_utc();
        staged.next_user_id += 1;
        let user = User {
            id: staged.next_user_id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            name: new_user.name,
            pic: new_user.pic,
            intro: new_user.intro,
            ref_rank: 0,
            dob: new_user.dob,
            country: new_user.country,
            location: new_user.location,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        staged.users.push(user.clone());

        if self.fail_permissions_insert.load(Ordering::SeqCst) {
            anyhow::bail!("insert user permissions: simulated failure");
        }
        staged.next_permissions_id += 1;
        staged.permissions.push(UserPermissions {
            id: staged.next_permissions_id,
            email: user.email.clone(),
            user_deactivated: false,
            banned_from_commenting: false,
            banned_from_posting: false,
            banned_from_analytix: false,
            created_at: now,
            updated_at: now,
        });

        *tables = staged;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        self.check_lookup()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        self.check_lookup()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| u.email == email && u.deleted_at.is_none())
            .cloned())
    }

    async fn update_country_and_location(
        &self,
        id: i64,
        country: &str,
        location: &str,
    ) -> anyhow::Result<Option<User>> {
        self.check_lookup()?;
        let mut tables = self.tables.lock().unwrap();
        Ok(Self::live_user_mut(&mut tables, id).map(|user| {
            user.country = country.to_string();
            user.location = location.to_string();
            user.updated_at = OffsetDateTime::now_utc();
            user.clone()
        }))
    }

    async fn list_users_in_location(
        &self,
        location: &str,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<User>> {
        self.check_lookup()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|u| u.location == location && u.deleted_at.is_none())
            .skip(usize::try_from(offset)?)
            .take(usize::try_from(limit)?)
            .cloned()
            .collect())
    }

    async fn search_candidates(&self, location: Option<&str>) -> anyhow::Result<Vec<User>> {
        self.check_lookup()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|u| u.deleted_at.is_none())
            .filter(|u| location.map_or(true, |l| u.location == l))
            .cloned()
            .collect())
    }

    async fn soft_delete_user(&self, email: &str) -> anyhow::Result<bool> {
        self.check_lookup()?;
        let mut tables = self.tables.lock().unwrap();
        let now = OffsetDateTime::now_utc();
        let mut deleted = false;
        for user in tables
            .users
            .iter_mut()
            .filter(|u| u.email == email && u.deleted_at.is_none())
        {
            user.deleted_at = Some(now);
            deleted = true;
        }
        tables.permissions.retain(|p| p.email != email);
        Ok(deleted)
    }

    async fn increment_referrals(&self, id: i64) -> anyhow::Result<Option<User>> {
        self.check_lookup()?;
        let mut tables = self.tables.lock().unwrap();
        Ok(Self::live_user_mut(&mut tables, id).map(|user| {
            user.ref_rank += 1;
            user.clone()
        }))
    }

    async fn find_permissions(&self, email: &str) -> anyhow::Result<Option<UserPermissions>> {
        self.check_lookup()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.permissions.iter().find(|p| p.email == email).cloned())
    }

    async fn set_permission_flag(
        &self,
        email: &str,
        flag: PermissionFlag,
        value: bool,
    ) -> anyhow::Result<Option<UserPermissions>> {
        self.check_lookup()?;
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .permissions
            .iter_mut()
            .find(|p| p.email == email)
            .map(|p| {
                flag.apply(p, value);
                p.updated_at = OffsetDateTime::now_utc();
                p.clone()
            }))
    }
}
