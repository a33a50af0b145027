use super::*;
use serde_json::json;

#[test]
fn user_missing_is_admin_defaults_false() {
    let user: User = serde_json::from_value(json!({ "id": 7, "username": "alice" })).unwrap();
    assert!(!user.is_admin);
    assert!(user.is_active);
    assert_eq!(user.email, None);
}

#[test]
fn auth_payload_parses_backend_shape() {
    let payload: AuthPayload = serde_json::from_value(json!({
        "user": {
            "id": 1,
            "username": "root",
            "email": "root@example.test",
            "is_active": true,
            "is_admin": true,
            "monthly_quota_tokens": 1_000_000,
            "monthly_quota_amount": 10.0
        },
        "token": "jwt-abc"
    }))
    .unwrap();
    assert_eq!(payload.token, "jwt-abc");
    assert!(payload.user.is_admin);
    assert_eq!(payload.user.monthly_quota_tokens, 1_000_000);
}

#[test]
fn error_detail_reads_string_detail() {
    let body = r#"{"detail":"Invalid username or password"}"#;
    assert_eq!(error_detail(body).as_deref(), Some("Invalid username or password"));
}

#[test]
fn error_detail_ignores_validation_lists() {
    let body = r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address"}]}"#;
    assert_eq!(error_detail(body), None);
}

#[test]
fn error_detail_ignores_non_json_and_blank() {
    assert_eq!(error_detail("<html>502</html>"), None);
    assert_eq!(error_detail(r#"{"detail":"   "}"#), None);
    assert_eq!(error_detail("{}"), None);
}
