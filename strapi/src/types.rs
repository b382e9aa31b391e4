//! Wire DTOs for the Strapi REST auth endpoints and the papers GraphQL schema.
//!
//! Field names mirror the server's camelCase JSON; Rust code uses snake_case.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

// =============================================================================
// AUTH
// =============================================================================

/// The authenticated user profile as returned by `/users/me` and auth calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Body returned by register, login and reset-password.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub jwt: String,
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// `identifier` is the email address; Strapi also accepts a username.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub code: String,
    pub password: String,
    pub password_confirmation: String,
}

// =============================================================================
// PAPERS
// =============================================================================

/// A paper as listed by `papers_connection`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub document_id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub username: String,
}

/// A single paper including its author, as returned by `paper(documentId)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperDetail {
    pub document_id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
}

impl PaperDetail {
    #[must_use]
    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().map(|a| a.username.as_str())
    }
}

/// Pagination block of a `papers_connection` result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PapersPage {
    pub nodes: Vec<Paper>,
    pub page_info: PageInfo,
}

/// Page selection for the list query. `None` means the server default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

/// Fields accepted by `createPaper` / `updatePaper`. Absent fields are left
/// untouched by an update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PaperInput {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

// =============================================================================
// DISPLAY
// =============================================================================

/// Format an RFC 3339 timestamp as e.g. `Mar 4, 2025`; unparseable input is
/// returned unchanged.
#[must_use]
pub fn display_date(raw: &str) -> String {
    let format = format_description!("[month repr:short] [day padding:none], [year]");
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .and_then(|dt| dt.format(&format).ok())
        .unwrap_or_else(|| raw.to_owned())
}

/// Format an RFC 3339 timestamp as e.g. `March 4, 2025`.
#[must_use]
pub fn display_date_long(raw: &str) -> String {
    let format = format_description!("[month repr:long] [day padding:none], [year]");
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .and_then(|dt| dt.format(&format).ok())
        .unwrap_or_else(|| raw.to_owned())
}
