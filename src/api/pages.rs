//! Minimal page renders.
//!
//! The real studio frontend is a static bundle served elsewhere; these
//! handlers only provide the opaque render surface the auth flow needs: a
//! home shell greeting the logged-in user, a login prompt, logout, and an
//! error page for failed authorization round trips.

use axum::{
    Extension,
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::{server::AppState, session};

#[derive(Debug, Deserialize)]
pub struct ErrorQuery {
    pub message: Option<String>,
}

/// `GET /` - the DJ studio page; redirects to login when no local user is
/// logged in.
pub async fn home(Extension(state): Extension<AppState>, cookies: Cookies) -> Response {
    let Some((_, session)) = session::current(&cookies, &state.sessions) else {
        return Redirect::to("/login").into_response();
    };
    let Some(username) = session.user else {
        return Redirect::to("/login").into_response();
    };

    let display_name = state
        .users
        .get(&username)
        .map(|u| u.display_name)
        .unwrap_or(username);

    Html(format!(
        "<h1>HandMixed Studio</h1><p>Welcome, {}.</p>",
        display_name
    ))
    .into_response()
}

/// `GET /login` - login prompt; redirects home when already logged in.
pub async fn login_page(Extension(state): Extension<AppState>, cookies: Cookies) -> Response {
    if let Some((_, session)) = session::current(&cookies, &state.sessions) {
        if session.user.is_some() {
            return Redirect::to("/").into_response();
        }
    }

    Html("<h1>HandMixed</h1><p><a href=\"/spotify/auth\">Log in with Spotify</a></p>")
        .into_response()
}

/// `GET /logout` - destroys the session (local login and Spotify tokens
/// alike) and returns to the login page.
pub async fn logout(Extension(state): Extension<AppState>, cookies: Cookies) -> Redirect {
    session::destroy(&cookies, &state.sessions);
    Redirect::to("/login")
}

/// `GET /error` - generic error page.
pub async fn error_page(Query(params): Query<ErrorQuery>) -> Html<String> {
    render_error(params.message.as_deref().unwrap_or("Something went wrong."))
}

pub(crate) fn render_error(message: &str) -> Html<String> {
    Html(format!(
        "<h1>Authorization error</h1><p>{}</p><p><a href=\"/login\">Back to login</a></p>",
        message
    ))
}
