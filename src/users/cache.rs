//! Process-wide memo of `/get-users-in-location` pages.
//!
//! Entries are write-once and never evicted or invalidated: once a page for a
//! location has been served, later changes to that location's users are not
//! reflected in it until the process restarts.

use dashmap::DashMap;

use crate::store::User;

pub const PAGE_SIZE: i64 = 5;

/// A 1-based page number; anything below 1 is treated as page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page(i64);

impl Page {
    pub fn new(requested: i64) -> Self {
        Self(requested.max(1))
    }

    pub fn number(self) -> i64 {
        self.0
    }

    pub fn limit(self) -> i64 {
        PAGE_SIZE
    }

    pub fn offset(self) -> i64 {
        (self.0 - 1).saturating_mul(PAGE_SIZE)
    }
}

#[derive(Debug, Default)]
pub struct LocationCache {
    pages: DashMap<(String, Page), Vec<User>>,
}

impl LocationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, location: &str, page: Page) -> Option<Vec<User>> {
        self.pages
            .get(&(location.to_string(), page))
            .map(|entry| entry.value().clone())
    }

    /// Stores `users` for the key unless a page is already there; the stored page is returned.
    pub fn put(&self, location: &str, page: Page, users: Vec<User>) -> Vec<User> {
        self.pages
            .entry((location.to_string(), page))
            .or_insert(users)
            .value()
            .clone()
    }
}
