//! One-shot flash messages carried in a cookie between a redirect and the
//! next page load. Pages consume them through `GET /api/messages`.

use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

/// Name of the cookie holding pending flash messages.
pub const FLASH_COOKIE: &str = "wicket_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub category: FlashCategory,
    pub message: String,
}

/// Append a message to the outgoing flash cookie.
pub fn push(jar: CookieJar, category: FlashCategory, message: impl Into<String>) -> CookieJar {
    let mut pending = read(&jar);
    pending.push(FlashMessage {
        category,
        message: message.into(),
    });
    write(jar, &pending)
}

/// Drain pending messages and clear the cookie.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<FlashMessage>) {
    let pending = read(&jar);
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, pending)
}

/// GET /api/messages — pending flash messages, delivered at most once.
pub async fn messages(jar: CookieJar) -> (CookieJar, Json<Vec<FlashMessage>>) {
    let (jar, pending) = take(jar);
    (jar, Json(pending))
}

/// A cookie that fails to decode is dropped silently.
fn read(jar: &CookieJar) -> Vec<FlashMessage> {
    jar.get(FLASH_COOKIE)
        .and_then(|c| URL_SAFE_NO_PAD.decode(c.value()).ok())
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

fn write(jar: CookieJar, pending: &[FlashMessage]) -> CookieJar {
    let value = URL_SAFE_NO_PAD.encode(serde_json::to_vec(pending).unwrap_or_default());
    jar.add(
        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_then_take_round_trips_in_order() {
        let jar = CookieJar::new();
        let jar = push(jar, FlashCategory::Error, "Email does not exist.");
        let jar = push(jar, FlashCategory::Success, "Logged in successfully!");

        let (jar, pending) = take(jar);
        assert_eq!(
            pending,
            vec![
                FlashMessage {
                    category: FlashCategory::Error,
                    message: "Email does not exist.".to_string(),
                },
                FlashMessage {
                    category: FlashCategory::Success,
                    message: "Logged in successfully!".to_string(),
                },
            ]
        );

        // Drained: a second take sees nothing.
        let (_, pending) = take(jar);
        assert!(pending.is_empty());
    }

    #[test]
    fn garbage_cookie_is_dropped() {
        let jar = CookieJar::new().add(
            Cookie::build((FLASH_COOKIE, "not base64 json %%"))
                .path("/")
                .build(),
        );
        let (_, pending) = take(jar);
        assert!(pending.is_empty());
    }
}
