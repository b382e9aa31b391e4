use super::*;

fn message(result: Result<(), ApiError>) -> String {
    match result {
        Err(ApiError::Validation(msg)) => msg,
        other => panic!("expected validation error, got {other:?}"),
    }
}

fn register_form() -> RegisterForm {
    RegisterForm {
        username: "alice".into(),
        email: "alice@x.com".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
    }
}

#[test]
fn email_shapes() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("first.last@mail.example.org"));
    assert!(!is_valid_email(""));
    assert!(!is_valid_email("alice"));
    assert!(!is_valid_email("@x.com"));
    assert!(!is_valid_email("a@x"));
    assert!(!is_valid_email("a@.com"));
    assert!(!is_valid_email("a@x."));
    assert!(!is_valid_email("a b@x.com"));
    assert!(!is_valid_email("a@b@x.com"));
}

#[test]
fn login_accepts_valid_credentials() {
    assert_eq!(login("alice@x.com", "secret1"), Ok(()));
}

#[test]
fn login_reports_all_issues() {
    assert_eq!(
        message(login("nope", "123")),
        "Invalid email address, Password must be at least 6 characters"
    );
}

#[test]
fn register_accepts_valid_form() {
    assert_eq!(register(&register_form()), Ok(()));
}

#[test]
fn register_rejects_short_username() {
    let form = RegisterForm { username: "al".into(), ..register_form() };
    assert_eq!(message(register(&form)), "Username must be at least 3 characters long");
}

#[test]
fn register_rejects_mismatched_passwords() {
    let form = RegisterForm { confirm_password: "secret2".into(), ..register_form() };
    assert_eq!(message(register(&form)), "Passwords don't match");
}

#[test]
fn register_rejects_short_confirmation() {
    let form = RegisterForm { confirm_password: "abc".into(), ..register_form() };
    assert_eq!(
        message(register(&form)),
        "Confirm Password must be at least 6 characters, Passwords don't match"
    );
}

#[test]
fn reset_requires_code_and_matching_passwords() {
    let form = ResetPasswordForm { code: String::new(), password: "abc".into(), password_confirmation: "abd".into() };
    assert_eq!(
        message(reset_password(&form)),
        "Reset code is missing, Passwords do not match, Password must be at least 6 characters long"
    );

    let ok = ResetPasswordForm { code: "c0de".into(), password: "secret1".into(), password_confirmation: "secret1".into() };
    assert_eq!(reset_password(&ok), Ok(()));
}

#[test]
fn forgot_password_checks_email() {
    assert_eq!(forgot_password("alice@x.com"), Ok(()));
    assert_eq!(message(forgot_password("alice")), "Invalid email address");
}
