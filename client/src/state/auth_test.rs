use super::*;

fn user(name: &str) -> User {
    User {
        id: 1,
        username: name.to_owned(),
        email: format!("{name}@x.com"),
        provider: "local".to_owned(),
        confirmed: true,
        blocked: false,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[test]
fn default_is_loading_and_anonymous() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(!state.is_authenticated());
    assert_eq!(state.username(), None);
}

#[test]
fn from_snapshot_copies_user_and_loading() {
    let state = AuthState::from(AuthSnapshot { user: Some(user("alice")), loading: false });
    assert!(state.is_authenticated());
    assert!(!state.loading);
    assert_eq!(state.username(), Some("alice"));
}
