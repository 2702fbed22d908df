//! Account service: password hash/verify and sign-up field validation.

use crate::error::{AppError, AppResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::ValidateLength;

use super::handlers::SignUpForm;

/// Why a sign-up form was rejected. The display strings are the flash
/// messages shown to the visitor.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SignUpRejection {
    #[error("Email must be longer than 3 characters")]
    EmailTooShort,
    #[error("First name must be longer than 1 character")]
    FirstNameTooShort,
    #[error("Passwords don't match")]
    PasswordMismatch,
    #[error("Password must be greater than 6 characters")]
    PasswordTooShort,
}

pub struct AccountService;

impl AccountService {
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("hash: {}", e)))?
            .to_string();
        Ok(hash)
    }

    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| AppError::Internal(anyhow::anyhow!("parse hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Field rules for sign-up, checked in the order the form shows them.
    pub fn validate_sign_up(form: &SignUpForm) -> Result<(), SignUpRejection> {
        if !form.email.validate_length(Some(4), None, None) {
            return Err(SignUpRejection::EmailTooShort);
        }
        if !form.first_name.validate_length(Some(2), None, None) {
            return Err(SignUpRejection::FirstNameTooShort);
        }
        if form.password1 != form.password2 {
            return Err(SignUpRejection::PasswordMismatch);
        }
        if !form.password1.validate_length(Some(7), None, None) {
            return Err(SignUpRejection::PasswordTooShort);
        }
        Ok(())
    }
}
