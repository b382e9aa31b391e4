//! Route paths and the navigation outcomes returned by auth actions.

pub const HOME_PATH: &str = "/";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const SIGN_IN_PATH: &str = "/auth";
pub const PAPERS_PATH: &str = "/papers";

/// Where the UI should go after an action completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Public landing page.
    Home,
    /// Authenticated landing area.
    Dashboard,
    /// Sign-in entry point.
    SignIn,
    /// Papers list.
    Papers,
}

impl Navigation {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => HOME_PATH,
            Self::Dashboard => DASHBOARD_PATH,
            Self::SignIn => SIGN_IN_PATH,
            Self::Papers => PAPERS_PATH,
        }
    }
}

/// Path of a paper's detail page.
#[must_use]
pub fn paper_path(document_id: &str) -> String {
    format!("{PAPERS_PATH}/{document_id}")
}
