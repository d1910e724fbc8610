//! Browser-session state and the session store.
//!
//! Each browser holds a single http-only cookie carrying an opaque session
//! id. Everything else lives server-side in a [`SessionStore`]: the local
//! login, the Spotify token material, the one-shot post-login redirect
//! target, and the deck assignments of the studio page.
//!
//! The store is a capability interface so tests can inject their own; the
//! bundled [`MemorySessionStore`] keeps records in a mutex-guarded map and
//! expires them after the configured TTL. Expired records are treated as
//! absent on read.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies};

use crate::utils;

/// Name of the cookie carrying the opaque session id.
pub const SESSION_COOKIE: &str = "handmixed_session";

/// External-provider token material held for the life of a browser session.
///
/// `obtained_at` and `expires_in` are bookkeeping only: no absolute expiry
/// instant is computed and no proactive refresh is performed. A 401 from
/// upstream clears the whole state, which is the sole invalidation path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokenState {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    pub obtained_at: u64,
    pub premium: bool,
}

/// Everything stored server-side for one browser session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    /// Username of the logged-in local user, if any.
    pub user: Option<String>,
    /// Spotify token state; absent means not connected to Spotify,
    /// regardless of local login.
    pub tokens: Option<SessionTokenState>,
    /// One-shot redirect target recorded before the OAuth round trip.
    pub pending_redirect: Option<String>,
    /// Deck slot -> track id, a UI-state cache with no catalog validation.
    pub deck_assignments: HashMap<String, String>,
}

/// Get/set/delete capability over session records.
pub trait SessionStore: Send + Sync {
    fn get(&self, id: &str) -> Option<SessionData>;
    fn set(&self, id: &str, data: SessionData);
    fn delete(&self, id: &str);
}

/// In-memory session store with server-side TTL enforcement.
pub struct MemorySessionStore {
    ttl: Duration,
    inner: Mutex<HashMap<String, (SessionData, DateTime<Utc>)>>,
}

impl MemorySessionStore {
    pub fn new(ttl_hours: i64) -> Self {
        MemorySessionStore {
            ttl: Duration::hours(ttl_hours),
            inner: Mutex::new(HashMap::new()),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, id: &str) -> Option<SessionData> {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match map.get(id) {
            Some((data, expires_at)) if *expires_at > Utc::now() => Some(data.clone()),
            Some(_) => {
                map.remove(id);
                None
            }
            None => None,
        }
    }

    fn set(&self, id: &str, data: SessionData) {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        map.insert(id.to_string(), (data, Utc::now() + self.ttl));
    }

    fn delete(&self, id: &str) {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(id);
    }
}

/// Returns the current session, if the browser presented a live cookie.
pub fn current(cookies: &Cookies, store: &Arc<dyn SessionStore>) -> Option<(String, SessionData)> {
    let cookie = cookies.get(SESSION_COOKIE)?;
    let id = cookie.value().to_string();
    let data = store.get(&id)?;
    Some((id, data))
}

/// Returns the current session, creating a fresh one (and cookie) if absent.
pub fn establish(cookies: &Cookies, store: &Arc<dyn SessionStore>) -> (String, SessionData) {
    if let Some(found) = current(cookies, store) {
        return found;
    }

    let id = utils::generate_session_id();
    let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
        .path("/")
        .http_only(true)
        .build();
    cookies.add(cookie);
    (id, SessionData::default())
}

/// Destroys the session record and removes the cookie.
pub fn destroy(cookies: &Cookies, store: &Arc<dyn SessionStore>) {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        store.delete(cookie.value());
    }
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
}
