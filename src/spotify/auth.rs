use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::{Client, header::AUTHORIZATION};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    config,
    error::AuthError,
    oauth::{MusicProvider, ProviderAuth},
    types::{ExternalProfile, TokenGrant},
};

/// The Spotify variant of the provider seam.
///
/// Configuration (client id/secret, redirect URI, endpoint URLs, scope set)
/// comes from [`crate::config`]; the struct itself is stateless.
pub struct SpotifyProvider;

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    id: String,
    display_name: Option<String>,
    email: Option<String>,
    product: Option<String>,
}

impl MusicProvider for SpotifyProvider {
    fn name(&self) -> &'static str {
        "spotify"
    }
}

impl ProviderAuth for SpotifyProvider {
    /// Builds the consent-screen URL.
    ///
    /// `show_dialog=true` forces the permission dialog on every login. The
    /// redirect URI is the exact literal that [`exchange_code`] sends later;
    /// Spotify rejects the exchange when the two differ.
    ///
    /// [`exchange_code`]: ProviderAuth::exchange_code
    fn authorize_url(&self) -> String {
        let params = [
            ("client_id", config::spotify_client_id()),
            ("response_type", "code".to_string()),
            ("redirect_uri", config::spotify_redirect_uri()),
            ("scope", config::spotify_scope()),
            ("show_dialog", "true".to_string()),
        ];

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", config::spotify_auth_url(), query)
    }

    /// Exchanges an authorization code for token material.
    ///
    /// The server-to-server POST is authenticated with HTTP Basic
    /// credentials (`client_id:client_secret`, base64). Any non-2xx status
    /// fails with [`AuthError::TokenExchangeFailed`] carrying the upstream
    /// status and body.
    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, AuthError> {
        let credentials = STANDARD.encode(format!(
            "{}:{}",
            config::spotify_client_id(),
            config::spotify_client_secret()
        ));

        let client = Client::new();
        let res = client
            .post(config::spotify_token_url())
            .header(AUTHORIZATION, format!("Basic {}", credentials))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                // Must match the URI used at authorization time.
                ("redirect_uri", &config::spotify_redirect_uri()),
            ])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AuthError::TokenExchangeFailed {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = res.json().await?;
        token_grant_from_json(status.as_u16(), &json)
    }

    /// Fetches the account profile with a fresh access token.
    ///
    /// The premium entitlement is derived from the `product` field; display
    /// name and email stay optional and are defaulted by the caller.
    async fn fetch_profile(
        &self,
        access_token: &str,
        timeout: Duration,
    ) -> Result<ExternalProfile, AuthError> {
        let client = Client::new();
        let res = client
            .get(format!("{}/me", config::spotify_api_url()))
            .bearer_auth(access_token)
            .timeout(timeout)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(AuthError::ProfileFetchFailed(status.as_u16()));
        }

        let profile: ProfileResponse = res.json().await?;

        Ok(ExternalProfile {
            premium: profile.product.as_deref() == Some("premium"),
            id: profile.id,
            display_name: profile.display_name,
            email: profile.email,
        })
    }
}

/// Extracts token material from a 2xx exchange response body.
///
/// A success status without a usable `access_token` still fails the exchange
/// as [`AuthError::TokenExchangeFailed`], carrying the body so the real cause
/// is visible instead of surfacing later as a profile-fetch failure.
pub fn token_grant_from_json(status: u16, json: &Value) -> Result<TokenGrant, AuthError> {
    let access_token = json["access_token"]
        .as_str()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::TokenExchangeFailed {
            status,
            body: json.to_string(),
        })?;

    Ok(TokenGrant {
        access_token: access_token.to_string(),
        refresh_token: json["refresh_token"].as_str().map(str::to_string),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
