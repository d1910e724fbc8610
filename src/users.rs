//! Local user records keyed by external account id.
//!
//! A [`LocalUser`] is the local principal bound 1:1 to an external account.
//! The username is the external account's stable id and never changes once
//! created; display name and email are overwritten with the latest upstream
//! values on every login (last-login-wins, no merge). Nothing here deletes a
//! user.

use std::{
    collections::HashMap,
    sync::Mutex,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalUser {
    pub username: String,
    pub display_name: String,
    pub email: String,
}

/// Get-or-create capability over local users.
pub trait UserStore: Send + Sync {
    fn get(&self, username: &str) -> Option<LocalUser>;

    /// Gets or creates the user for `username` and unconditionally
    /// overwrites display name and email. Returns the record and whether it
    /// was newly created.
    fn upsert(&self, username: &str, display_name: &str, email: &str) -> (LocalUser, bool);
}

/// In-memory user store backing the server and the tests.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<HashMap<String, LocalUser>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        MemoryUserStore::default()
    }

    pub fn count(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl UserStore for MemoryUserStore {
    fn get(&self, username: &str) -> Option<LocalUser> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(username)
            .cloned()
    }

    fn upsert(&self, username: &str, display_name: &str, email: &str) -> (LocalUser, bool) {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let created = !map.contains_key(username);
        let user = LocalUser {
            username: username.to_string(),
            display_name: display_name.to_string(),
            email: email.to_string(),
        };
        map.insert(username.to_string(), user.clone());
        (user, created)
    }
}
