//! Auth extractors: resolve the session cookie to the logged-in user.

use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::auth::{LOGIN_PAGE, SESSION_COOKIE};
use crate::db::UserRow;
use crate::handlers::http::AppState;

/// Extractor: the logged-in user and their session token. Requests
/// without a live session are redirected to the login page.
#[derive(Debug)]
pub struct AuthUser {
    pub user: UserRow,
    pub token: String,
}

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(|| Redirect::to(LOGIN_PAGE))?;

        let user = state
            .sessions()
            .resolve(state.db(), &token)
            .await
            .map_err(|e| {
                debug!(error = %e, "session lookup failed");
                Redirect::to(LOGIN_PAGE)
            })?
            .ok_or_else(|| Redirect::to(LOGIN_PAGE))?;

        Ok(AuthUser { user, token })
    }
}

/// Extractor: the logged-in user if any; never rejects.
#[derive(Debug)]
pub struct MaybeUser(pub Option<UserRow>);

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
            return Ok(MaybeUser(None));
        };

        let user = match state.sessions().resolve(state.db(), &token).await {
            Ok(user) => user,
            Err(e) => {
                debug!(error = %e, "session lookup failed");
                None
            }
        };
        Ok(MaybeUser(user))
    }
}
