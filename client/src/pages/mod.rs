//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates session and data
//! rules to the `strapi` services provided through context.

pub mod auth;
pub mod dashboard;
pub mod forgot_password;
pub mod home;
pub mod paper_detail;
pub mod paper_new;
pub mod papers;
