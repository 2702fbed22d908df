//! Database-backed login sessions referenced by an opaque cookie token.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::db::{
    session_create, session_delete_by_token, session_find_by_token, user_get_by_id, DbPool,
    SessionRow, UserRow,
};
use crate::error::AppResult;

/// Name of the browser cookie carrying the session token.
pub const SESSION_COOKIE: &str = "wicket_session";

/// Issues, resolves, and revokes login sessions.
#[derive(Clone)]
pub struct Sessions {
    ttl: Duration,
}

impl Sessions {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Start a session for a user: generate a token and persist it with
    /// an expiry `ttl` from now.
    pub async fn start(&self, pool: &DbPool, user_id: Uuid) -> AppResult<SessionRow> {
        let token = new_token();
        let expires_at = Utc::now() + self.ttl;
        session_create(pool, user_id, &token, expires_at).await
    }

    /// Resolve a token to its user. Expired rows never authenticate and
    /// are deleted when touched.
    pub async fn resolve(&self, pool: &DbPool, token: &str) -> AppResult<Option<UserRow>> {
        let Some(session) = session_find_by_token(pool, token).await? else {
            return Ok(None);
        };
        if is_expired(session.expires_at, Utc::now()) {
            session_delete_by_token(pool, token).await?;
            tracing::debug!(user_id = %session.user_id, "expired session dropped");
            return Ok(None);
        }
        user_get_by_id(pool, session.user_id).await
    }

    /// Destroy the server-side session row.
    pub async fn revoke(&self, pool: &DbPool, token: &str) -> AppResult<()> {
        session_delete_by_token(pool, token).await
    }

    /// Persistent session cookie (the legacy flow always "remembers" the login).
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(self.ttl.num_seconds()))
            .build()
    }

    /// Cookie that clears the session cookie on the client.
    pub fn removal_cookie() -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE).path("/").build()
    }
}

fn new_token() -> String {
    format!("sess_{}", Uuid::new_v4().simple())
}

fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at <= now
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_prefixed_and_unique() {
        let a = new_token();
        let b = new_token();
        assert!(a.starts_with("sess_"));
        assert_eq!(a.len(), "sess_".len() + 32);
        assert_ne!(a, b);
    }

    #[test]
    fn session_cookie_attributes() {
        let sessions = Sessions::new(Duration::days(30));
        let cookie = sessions.session_cookie("sess_abc".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::days(30))
        );
    }

    #[test]
    fn expiry_is_inclusive() {
        let now = Utc::now();
        assert!(is_expired(now, now));
        assert!(is_expired(now - Duration::seconds(1), now));
        assert!(!is_expired(now + Duration::seconds(1), now));
    }
}
