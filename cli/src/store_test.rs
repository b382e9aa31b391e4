use super::*;

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("papers-cli-{}-{name}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

fn user() -> User {
    User {
        id: 3,
        username: "alice".to_owned(),
        email: "alice@x.com".to_owned(),
        provider: "local".to_owned(),
        confirmed: true,
        blocked: false,
        created_at: "2025-03-04T10:00:00.000Z".to_owned(),
        updated_at: "2025-03-04T10:00:00.000Z".to_owned(),
    }
}

#[test]
fn missing_file_starts_empty() {
    let store = FileCredentialStore::open(&temp_path("missing"));
    assert_eq!(store.token(), None);
    assert_eq!(store.profile(), None);
}

#[test]
fn session_survives_reopen() {
    let path = temp_path("reopen");
    let store = FileCredentialStore::open(&path);
    store.set_token("t1");
    store.set_user(&user());

    let reopened = FileCredentialStore::open(&path);
    assert_eq!(reopened.token().as_deref(), Some("t1"));
    assert_eq!(reopened.profile(), Some(user()));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn clear_removes_file() {
    let path = temp_path("clear");
    let store = FileCredentialStore::open(&path);
    store.set_token("t1");
    assert!(path.exists());

    store.clear();

    assert!(!path.exists());
    assert_eq!(FileCredentialStore::open(&path).token(), None);
}

#[test]
fn profile_without_token_is_void() {
    let path = temp_path("no-token");
    let store = FileCredentialStore::open(&path);
    store.set_user(&user());
    assert_eq!(store.user(), Some(user()));
    assert_eq!(store.profile(), None);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn malformed_file_is_ignored() {
    let path = temp_path("malformed");
    std::fs::write(&path, "{not json").unwrap();
    let store = FileCredentialStore::open(&path);
    assert_eq!(store.token(), None);
    let _ = std::fs::remove_file(&path);
}
