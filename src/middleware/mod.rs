//! Session-cookie extractors shared by the auth handlers and the JSON API.

pub mod auth;

pub use auth::{AuthUser, MaybeUser};
