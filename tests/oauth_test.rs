use std::sync::Mutex;
use std::time::Duration;

use serde_json::json;

use handmixed::error::AuthError;
use handmixed::oauth::{self, MusicProvider, ProviderAuth};
use handmixed::session::SessionData;
use handmixed::spotify::auth::token_grant_from_json;
use handmixed::types::{ExternalProfile, TokenGrant};
use handmixed::users::MemoryUserStore;

// Counting mock for the provider auth capability. Tracks upstream side
// effects so tests can assert which calls happened.
struct MockProvider {
    exchange_calls: Mutex<u32>,
    profile_calls: Mutex<u32>,
    fail_exchange: bool,
    display_name: Option<&'static str>,
    email: Option<&'static str>,
}

impl MockProvider {
    fn new() -> Self {
        MockProvider {
            exchange_calls: Mutex::new(0),
            profile_calls: Mutex::new(0),
            fail_exchange: false,
            display_name: Some("Ann"),
            email: Some("ann@example.com"),
        }
    }

    fn exchange_count(&self) -> u32 {
        *self.exchange_calls.lock().unwrap()
    }
}

impl MusicProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }
}

impl ProviderAuth for MockProvider {
    fn authorize_url(&self) -> String {
        "https://provider.example/authorize?client_id=x".to_string()
    }

    async fn exchange_code(&self, _code: &str) -> Result<TokenGrant, AuthError> {
        *self.exchange_calls.lock().unwrap() += 1;
        if self.fail_exchange {
            return Err(AuthError::TokenExchangeFailed {
                status: 400,
                body: "invalid_grant".to_string(),
            });
        }
        Ok(TokenGrant {
            access_token: "T1".to_string(),
            refresh_token: Some("R1".to_string()),
            expires_in: 3600,
            obtained_at: 1_700_000_000,
        })
    }

    async fn fetch_profile(
        &self,
        access_token: &str,
        _timeout: Duration,
    ) -> Result<ExternalProfile, AuthError> {
        *self.profile_calls.lock().unwrap() += 1;
        assert_eq!(access_token, "T1");
        Ok(ExternalProfile {
            id: "u1".to_string(),
            display_name: self.display_name.map(str::to_string),
            email: self.email.map(str::to_string),
            premium: true,
        })
    }
}

#[test]
fn test_begin_authorization_records_redirect_target() {
    let provider = MockProvider::new();
    let mut session = SessionData::default();

    let url = oauth::begin_authorization(&provider, &mut session, Some("/studio".to_string()));
    assert!(url.starts_with("https://provider.example/authorize"));
    assert_eq!(session.pending_redirect.as_deref(), Some("/studio"));

    // Absent target defaults to the home route
    let mut session = SessionData::default();
    oauth::begin_authorization(&provider, &mut session, None);
    assert_eq!(session.pending_redirect.as_deref(), Some("/"));
}

#[tokio::test]
async fn test_provider_error_skips_exchange() {
    let provider = MockProvider::new();
    let users = MemoryUserStore::new();
    let mut session = SessionData::default();

    let result = oauth::complete_authorization(
        &provider,
        &users,
        &mut session,
        Some("abc".to_string()),
        Some("access_denied".to_string()),
    )
    .await;

    assert!(matches!(result, Err(AuthError::ProviderDenied(_))));

    // No network side effect and no state mutation
    assert_eq!(provider.exchange_count(), 0);
    assert_eq!(users.count(), 0);
    assert!(session.user.is_none());
    assert!(session.tokens.is_none());
}

#[tokio::test]
async fn test_missing_code_fails_without_exchange() {
    let provider = MockProvider::new();
    let users = MemoryUserStore::new();
    let mut session = SessionData::default();

    let result =
        oauth::complete_authorization(&provider, &users, &mut session, None, None).await;

    assert!(matches!(result, Err(AuthError::MissingCode)));
    assert_eq!(provider.exchange_count(), 0);
    assert_eq!(users.count(), 0);
}

#[tokio::test]
async fn test_complete_authorization_happy_path() {
    let provider = MockProvider::new();
    let users = MemoryUserStore::new();
    let mut session = SessionData::default();
    session.pending_redirect = Some("/studio".to_string());

    let outcome = oauth::complete_authorization(
        &provider,
        &users,
        &mut session,
        Some("abc".to_string()),
        None,
    )
    .await
    .unwrap();

    // Local user provisioned from the upstream profile
    assert!(outcome.created);
    assert_eq!(outcome.user.username, "u1");
    assert_eq!(outcome.user.display_name, "Ann");
    assert_eq!(users.count(), 1);

    // Session holds login and token state
    assert_eq!(session.user.as_deref(), Some("u1"));
    let tokens = session.tokens.as_ref().unwrap();
    assert_eq!(tokens.access_token, "T1");
    assert_eq!(tokens.refresh_token.as_deref(), Some("R1"));
    assert_eq!(tokens.expires_in, 3600);
    assert!(tokens.premium);

    // Pending redirect consumed exactly once
    assert_eq!(outcome.redirect_to, "/studio");
    assert!(session.pending_redirect.is_none());
}

#[tokio::test]
async fn test_relogin_updates_user_without_duplicate() {
    let users = MemoryUserStore::new();

    let first = MockProvider::new();
    let mut session = SessionData::default();
    let outcome =
        oauth::complete_authorization(&first, &users, &mut session, Some("abc".to_string()), None)
            .await
            .unwrap();
    assert!(outcome.created);

    // Second login for the same external id with a changed display name
    let mut second = MockProvider::new();
    second.display_name = Some("Ann Lee");
    let mut session = SessionData::default();
    let outcome = oauth::complete_authorization(
        &second,
        &users,
        &mut session,
        Some("def".to_string()),
        None,
    )
    .await
    .unwrap();

    // Updated in place, not duplicated
    assert!(!outcome.created);
    assert_eq!(outcome.user.display_name, "Ann Lee");
    assert_eq!(users.count(), 1);
}

#[tokio::test]
async fn test_exchange_failure_leaves_no_state() {
    let mut provider = MockProvider::new();
    provider.fail_exchange = true;
    let users = MemoryUserStore::new();
    let mut session = SessionData::default();
    session.pending_redirect = Some("/studio".to_string());

    let result = oauth::complete_authorization(
        &provider,
        &users,
        &mut session,
        Some("abc".to_string()),
        None,
    )
    .await;

    assert!(matches!(
        result,
        Err(AuthError::TokenExchangeFailed { status: 400, .. })
    ));

    // Partial failure: no local user, no login, no token state; the
    // redirect target stays for a retry
    assert_eq!(users.count(), 0);
    assert!(session.user.is_none());
    assert!(session.tokens.is_none());
    assert_eq!(session.pending_redirect.as_deref(), Some("/studio"));
}

#[tokio::test]
async fn test_profile_fallbacks_synthesize_fields() {
    let mut provider = MockProvider::new();
    provider.display_name = None;
    provider.email = None;
    let users = MemoryUserStore::new();
    let mut session = SessionData::default();

    let outcome = oauth::complete_authorization(
        &provider,
        &users,
        &mut session,
        Some("abc".to_string()),
        None,
    )
    .await
    .unwrap();

    // Display name falls back to the external id, email to a synthesized
    // per-provider placeholder
    assert_eq!(outcome.user.display_name, "u1");
    assert_eq!(outcome.user.email, "u1@mock.local");
}

#[test]
fn test_token_grant_parsing() {
    let grant = token_grant_from_json(
        200,
        &json!({ "access_token": "T1", "refresh_token": "R1", "expires_in": 1800 }),
    )
    .unwrap();
    assert_eq!(grant.access_token, "T1");
    assert_eq!(grant.refresh_token.as_deref(), Some("R1"));
    assert_eq!(grant.expires_in, 1800);

    // Refresh token and TTL are optional; TTL defaults to an hour
    let grant = token_grant_from_json(200, &json!({ "access_token": "T2" })).unwrap();
    assert!(grant.refresh_token.is_none());
    assert_eq!(grant.expires_in, 3600);
}

#[test]
fn test_token_grant_missing_access_token_fails_exchange() {
    // A 2xx body without a usable access token is an exchange failure, not
    // a later profile-fetch failure
    let err = token_grant_from_json(200, &json!({ "scope": "user-read-private" })).unwrap_err();
    assert!(matches!(
        err,
        AuthError::TokenExchangeFailed { status: 200, .. }
    ));

    let err = token_grant_from_json(200, &json!({ "access_token": "" })).unwrap_err();
    assert!(matches!(err, AuthError::TokenExchangeFailed { .. }));
}
