use super::*;

#[test]
fn user_deserializes_camel_case() {
    let raw = r#"{
        "id": 7,
        "documentId": "u7",
        "username": "alice",
        "email": "a@x.com",
        "provider": "local",
        "confirmed": true,
        "blocked": false,
        "createdAt": "2025-03-04T10:00:00.000Z",
        "updatedAt": "2025-03-05T10:00:00.000Z"
    }"#;
    let user: User = serde_json::from_str(raw).unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.username, "alice");
    assert!(user.confirmed);
    assert_eq!(user.created_at, "2025-03-04T10:00:00.000Z");
}

#[test]
fn reset_password_request_uses_wire_field_names() {
    let req = ResetPasswordRequest {
        code: "abc".into(),
        password: "secret1".into(),
        password_confirmation: "secret1".into(),
    };
    assert_eq!(
        serde_json::to_value(req).unwrap(),
        serde_json::json!({ "code": "abc", "password": "secret1", "passwordConfirmation": "secret1" })
    );
}

#[test]
fn paper_input_skips_absent_fields() {
    let input = PaperInput { title: Some("T".into()), content: None };
    assert_eq!(serde_json::to_value(&input).unwrap(), serde_json::json!({ "title": "T" }));
    assert!(!input.is_empty());
    assert!(PaperInput::default().is_empty());
}

#[test]
fn paper_detail_tolerates_missing_author() {
    let raw = r#"{"documentId":"d1","title":"T","content":null,"author":null}"#;
    let paper: PaperDetail = serde_json::from_str(raw).unwrap();
    assert_eq!(paper.author_name(), None);
    assert_eq!(paper.content, None);
}

#[test]
fn display_date_formats_rfc3339() {
    assert_eq!(display_date("2025-03-04T10:00:00.000Z"), "Mar 4, 2025");
    assert_eq!(display_date_long("2025-03-04T10:00:00.000Z"), "March 4, 2025");
}

#[test]
fn display_date_passes_through_garbage() {
    assert_eq!(display_date("yesterday"), "yesterday");
}
