//! Authentication: sign-up, login, logout, cookie sessions.

mod handlers;
mod service;
mod session;

pub use handlers::{current_user, login, logout, sign_up};
pub use service::{AccountService, SignUpRejection};
pub use session::{Sessions, SESSION_COOKIE};

/// Pages the auth flows redirect to. Served as static files by `main`.
pub const HOME_PAGE: &str = "/";
pub const LOGIN_PAGE: &str = "/login.html";
pub const SIGN_UP_PAGE: &str = "/sign-up.html";
