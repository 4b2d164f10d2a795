//! Authentication middleware that validates cookies, extends sessions, and handles redirects.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{HeaderMap, StatusCode, header::SET_COOKIE, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use time::Duration;

use crate::{
    AppState,
    auth::{
        UserID,
        cookie::{extend_auth_cookie_duration_if_needed, get_token_from_cookies},
    },
    endpoints,
};

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// How far past the current request the session is kept alive.
    pub cookie_duration: Duration,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
        }
    }
}

impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// How a request without a valid session is sent to the log-in page.
#[derive(Debug, Clone, Copy)]
enum LogInRedirect {
    /// A plain `303 See Other` for page loads.
    Page,
    /// An `HX-Redirect` header so HTMX swaps the whole page instead of a fragment.
    Htmx,
}

impl IntoResponse for LogInRedirect {
    fn into_response(self) -> Response {
        match self {
            LogInRedirect::Page => Redirect::to(endpoints::LOG_IN_VIEW).into_response(),
            LogInRedirect::Htmx => (
                HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
                StatusCode::OK,
            )
                .into_response(),
        }
    }
}

/// Read the session cookie from the request, returning the jar it came in and the user it names.
async fn authenticate(
    parts: &mut Parts,
    state: &AuthState,
) -> Option<(PrivateCookieJar, UserID)> {
    let jar = match PrivateCookieJar::from_request_parts(parts, state).await {
        Ok(jar) => jar,
        Err(error) => {
            tracing::error!("could not read cookie jar: {error:?}");
            return None;
        }
    };

    match get_token_from_cookies(&jar) {
        Ok(token) => Some((jar, token.user_id)),
        Err(error) => {
            tracing::debug!("rejected request to {}: {error}", parts.uri.path());
            None
        }
    }
}

fn copy_set_cookie_headers(jar: PrivateCookieJar, headers: &mut HeaderMap) {
    let jar_response = jar.into_response();

    for value in jar_response.headers().get_all(SET_COOKIE) {
        headers.append(SET_COOKIE, value.to_owned());
    }
}

async fn guard(state: AuthState, request: Request, next: Next, redirect: LogInRedirect) -> Response {
    let (mut parts, body) = request.into_parts();

    let Some((jar, user_id)) = authenticate(&mut parts, &state).await else {
        return redirect.into_response();
    };

    parts.extensions.insert(user_id);
    let response = next.run(Request::from_parts(parts, body)).await;

    let jar = extend_auth_cookie_duration_if_needed(jar.clone(), state.cookie_duration)
        .unwrap_or_else(|error| {
            tracing::error!("could not extend session for user {user_id}: {error}");
            jar
        });

    let (mut parts, body) = response.into_parts();
    copy_set_cookie_headers(jar, &mut parts.headers);

    Response::from_parts(parts, body)
}

/// Only lets requests with a valid session cookie through, redirecting everyone else to the log-in page.
///
/// The session is extended on every request that gets through. Handlers
/// receive the user with `Extension(user_id): Extension<UserID>`.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    guard(state, request, next, LogInRedirect::Page).await
}

/// Same as [auth_guard], but redirects with `HX-Redirect` for routes called from HTMX forms.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    guard(state, request, next, LogInRedirect::Htmx).await
}
