//! Form validation run before any request is sent.
//!
//! Each check collects every issue for the form and reports them together as
//! one [`ApiError::Validation`], joined with ", " for inline display.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::error::ApiError;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_USERNAME_LEN: usize = 3;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// `code` arrives in the reset link (`/forgot-password?code=...`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResetPasswordForm {
    pub code: String,
    pub password: String,
    pub password_confirmation: String,
}

/// # Errors
///
/// Returns [`ApiError::Validation`] listing every problem with the form.
pub fn login(email: &str, password: &str) -> Result<(), ApiError> {
    let mut issues = Vec::new();
    check_email(email, &mut issues);
    if password.chars().count() < MIN_PASSWORD_LEN {
        issues.push("Password must be at least 6 characters");
    }
    finish(issues)
}

/// # Errors
///
/// Returns [`ApiError::Validation`] listing every problem with the form.
pub fn register(form: &RegisterForm) -> Result<(), ApiError> {
    let mut issues = Vec::new();
    if form.username.trim().chars().count() < MIN_USERNAME_LEN {
        issues.push("Username must be at least 3 characters long");
    }
    check_email(&form.email, &mut issues);
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        issues.push("Password must be at least 6 characters");
    }
    if form.confirm_password.chars().count() < MIN_PASSWORD_LEN {
        issues.push("Confirm Password must be at least 6 characters");
    }
    if form.password != form.confirm_password {
        issues.push("Passwords don't match");
    }
    finish(issues)
}

/// # Errors
///
/// Returns [`ApiError::Validation`] listing every problem with the form.
pub fn reset_password(form: &ResetPasswordForm) -> Result<(), ApiError> {
    let mut issues = Vec::new();
    if form.code.trim().is_empty() {
        issues.push("Reset code is missing");
    }
    if form.password != form.password_confirmation {
        issues.push("Passwords do not match");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        issues.push("Password must be at least 6 characters long");
    }
    finish(issues)
}

/// # Errors
///
/// Returns [`ApiError::Validation`] if `email` is not an address.
pub fn forgot_password(email: &str) -> Result<(), ApiError> {
    let mut issues = Vec::new();
    check_email(email, &mut issues);
    finish(issues)
}

/// Shape check only: `local@domain.tld`, no whitespace.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
        && !domain.contains("..")
}

fn check_email(email: &str, issues: &mut Vec<&'static str>) {
    if !is_valid_email(email.trim()) {
        issues.push("Invalid email address");
    }
}

fn finish(issues: Vec<&str>) -> Result<(), ApiError> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(issues.join(", ")))
    }
}
