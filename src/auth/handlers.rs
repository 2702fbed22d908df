//! Auth HTTP handlers: sign-up, login, logout, current user.
//!
//! The form handlers follow the classic server-rendered flow: validate,
//! flash a message, redirect. Browser pages are static files; the flash
//! cookie and `/api/me` carry the dynamic state.

use axum::{extract::State, response::Redirect, Form, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth::{AccountService, Sessions, HOME_PAGE, LOGIN_PAGE, SIGN_UP_PAGE};
use crate::db::{user_create, user_find_by_email};
use crate::error::AppError;
use crate::flash::{self, FlashCategory};
use crate::handlers::http::AppState;
use crate::middleware::auth::{AuthUser, MaybeUser};

#[derive(Debug, Deserialize)]
pub struct SignUpForm {
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    pub password1: String,
    pub password2: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub first_name: String,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: Option<UserInfo>,
}

/// POST /auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignUpForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    if user_find_by_email(state.db(), &form.email).await?.is_some() {
        return Ok(flash_redirect(
            jar,
            FlashCategory::Error,
            "Email already exists!",
            SIGN_UP_PAGE,
        ));
    }
    if let Err(rejection) = AccountService::validate_sign_up(&form) {
        return Ok(flash_redirect(
            jar,
            FlashCategory::Error,
            rejection.to_string(),
            SIGN_UP_PAGE,
        ));
    }

    let password_hash = AccountService::hash_password(&form.password1)?;
    let user = match user_create(state.db(), &form.email, &form.first_name, &password_hash).await {
        Ok(user) => user,
        // Insert raced another sign-up for the same email.
        Err(AppError::Validation(message)) => {
            return Ok(flash_redirect(jar, FlashCategory::Error, message, SIGN_UP_PAGE));
        }
        Err(e) => return Err(e),
    };

    let session = state.sessions().start(state.db(), user.id).await?;
    let jar = jar.add(state.sessions().session_cookie(session.token));
    tracing::info!(user_id = %user.id, "account created");
    Ok(flash_redirect(
        jar,
        FlashCategory::Success,
        "Account created!",
        HOME_PAGE,
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let Some(user) = user_find_by_email(state.db(), &form.email).await? else {
        return Ok(flash_redirect(
            jar,
            FlashCategory::Error,
            "Email does not exist.",
            LOGIN_PAGE,
        ));
    };

    if !AccountService::verify_password(&form.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "password mismatch");
        return Ok(flash_redirect(
            jar,
            FlashCategory::Error,
            "Incorrect password, please try again.",
            LOGIN_PAGE,
        ));
    }

    let session = state.sessions().start(state.db(), user.id).await?;
    let jar = jar.add(state.sessions().session_cookie(session.token));
    tracing::info!(user_id = %user.id, "logged in");
    Ok(flash_redirect(
        jar,
        FlashCategory::Success,
        "Logged in successfully!",
        HOME_PAGE,
    ))
}

/// POST /auth/logout — requires a logged-in session.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    state.sessions().revoke(state.db(), &auth.token).await?;
    let jar = jar.remove(Sessions::removal_cookie());
    tracing::info!(user_id = %auth.user.id, "logged out");
    Ok((jar, Redirect::to(LOGIN_PAGE)))
}

/// GET /api/me — who is logged in, if anyone.
pub async fn current_user(MaybeUser(user): MaybeUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        user: user.map(|u| UserInfo {
            id: u.id.to_string(),
            email: u.email,
            first_name: u.first_name,
        }),
    })
}

fn flash_redirect(
    jar: CookieJar,
    category: FlashCategory,
    message: impl Into<String>,
    to: &str,
) -> (CookieJar, Redirect) {
    (flash::push(jar, category, message), Redirect::to(to))
}
