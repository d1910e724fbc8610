//! Provider seam and the authorization-code exchange service.
//!
//! Provider-specific behavior sits behind two small traits instead of being
//! duplicated across route modules. [`MusicProvider`] names a catalog
//! provider; [`ProviderAuth`] is the optional authorization capability on top
//! of it. Spotify implements both; the open Audius catalog implements only
//! the base trait, so the absence of an OAuth (or playback) surface is a
//! type-level fact rather than a stub that throws.
//!
//! The service functions here own the login round trip: recording where to
//! send the user afterwards, exchanging the one-time code, fetching the
//! external profile, and provisioning the local user before any session
//! state is written.

use std::time::Duration;

use crate::{
    error::AuthError,
    session::{SessionData, SessionTokenState},
    types::{ExternalProfile, TokenGrant},
    users::{LocalUser, UserStore},
};

/// A third-party music catalog provider.
pub trait MusicProvider {
    /// Short stable name, used in synthesized placeholder emails.
    fn name(&self) -> &'static str;
}

/// Authorization capability of a provider: the OAuth 2.0 authorization-code
/// flow plus a profile fetch with the resulting token.
pub trait ProviderAuth: MusicProvider {
    /// Builds the consent-screen URL the browser is redirected to.
    fn authorize_url(&self) -> String;

    /// Exchanges a one-time authorization code for token material.
    fn exchange_code(
        &self,
        code: &str,
    ) -> impl std::future::Future<Output = Result<TokenGrant, AuthError>> + Send;

    /// Fetches the external profile with a fresh access token.
    fn fetch_profile(
        &self,
        access_token: &str,
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<ExternalProfile, AuthError>> + Send;
}

/// Result of a completed authorization round trip.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: LocalUser,
    /// True when this login created the local user record.
    pub created: bool,
    /// Consumed pending redirect target, or the home route.
    pub redirect_to: String,
}

/// Timeout for the server-to-server calls of the login round trip.
const AUTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Records the post-login redirect target and returns the consent URL.
///
/// The target defaults to the home route. It is stored in the session as a
/// one-shot value and consumed by [`complete_authorization`].
pub fn begin_authorization<P: ProviderAuth>(
    provider: &P,
    session: &mut SessionData,
    return_to: Option<String>,
) -> String {
    session.pending_redirect = Some(return_to.unwrap_or_else(|| "/".to_string()));
    provider.authorize_url()
}

/// Completes the authorization-code round trip.
///
/// Validates the callback parameters, exchanges the code, fetches the
/// external profile, and get-or-creates the [`LocalUser`] keyed by the
/// external id. On an existing record the display name and email are
/// overwritten unconditionally with the latest upstream values.
///
/// Side-effect ordering is part of the contract: the local user is
/// provisioned first, then the login and token state are written into the
/// session. On any failure the function returns before mutating anything,
/// so a failed token exchange leaves neither a local user nor session
/// state behind.
///
/// The caller persists the mutated session back to its store only on
/// success.
pub async fn complete_authorization<P: ProviderAuth>(
    provider: &P,
    users: &dyn UserStore,
    session: &mut SessionData,
    code: Option<String>,
    error: Option<String>,
) -> Result<AuthOutcome, AuthError> {
    if let Some(reason) = error {
        return Err(AuthError::ProviderDenied(reason));
    }
    let code = code.filter(|c| !c.is_empty()).ok_or(AuthError::MissingCode)?;

    let grant = provider.exchange_code(&code).await?;
    let profile = provider
        .fetch_profile(&grant.access_token, AUTH_TIMEOUT)
        .await?;

    let (user, created) = users.upsert(
        &profile.id,
        &profile.display_name_or_id(),
        &profile.email_or_placeholder(provider.name()),
    );

    session.user = Some(user.username.clone());
    session.tokens = Some(SessionTokenState {
        access_token: grant.access_token,
        refresh_token: grant.refresh_token,
        expires_in: grant.expires_in,
        obtained_at: grant.obtained_at,
        premium: profile.premium,
    });

    let redirect_to = session
        .pending_redirect
        .take()
        .unwrap_or_else(|| "/".to_string());

    Ok(AuthOutcome {
        user,
        created,
        redirect_to,
    })
}
