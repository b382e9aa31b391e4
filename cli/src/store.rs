//! Session persistence for the CLI: a small JSON file holding the token and
//! the cached profile.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use strapi::credentials::CredentialStore;
use strapi::types::User;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jwt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

pub struct FileCredentialStore {
    path: PathBuf,
    session: Mutex<Session>,
}

impl FileCredentialStore {
    /// Load `path` if it exists. Unreadable or malformed files start empty.
    pub fn open(path: &Path) -> Self {
        let session = match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed session file");
                Session::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Session::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read session file");
                Session::default()
            }
        };
        Self { path: path.to_owned(), session: Mutex::new(session) }
    }

    fn update(&self, f: impl FnOnce(&mut Session)) {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session);
        if let Err(e) = self.persist(&session) {
            tracing::warn!(path = %self.path.display(), error = %e, "cannot write session file");
        }
    }

    fn persist(&self, session: &Session) -> std::io::Result<()> {
        if session.jwt.is_none() && session.user.is_none() {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            };
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)
    }

    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.session.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl CredentialStore for FileCredentialStore {
    fn set_token(&self, token: &str) {
        self.update(|s| s.jwt = Some(token.to_owned()));
    }

    fn token(&self) -> Option<String> {
        self.read(|s| s.jwt.clone())
    }

    fn set_user(&self, user: &User) {
        self.update(|s| s.user = Some(user.clone()));
    }

    fn user(&self) -> Option<User> {
        self.read(|s| s.user.clone())
    }

    fn clear(&self) {
        self.update(|s| *s = Session::default());
    }
}
