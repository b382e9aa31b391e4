//! Reactive state shared through Leptos context.
//!
//! ARCHITECTURE
//! ============
//! `auth` mirrors the session service for rendering; `papers` holds the
//! pure view logic of the papers pages.

pub mod auth;
pub mod papers;
