use serde_json::json;

use super::ErrorResponse;
use super::StatusResponse;
use super::VerifyResponse;

#[test]
fn it_reads_string_and_numeric_user_ids() {
    let res: VerifyResponse = serde_json::from_value(json!({ "user_id": "u-1" })).unwrap();
    assert_eq!(res.user_id(), Some("u-1".to_string()));

    let res: VerifyResponse = serde_json::from_value(json!({ "user_id": 42 })).unwrap();
    assert_eq!(res.user_id(), Some("42".to_string()));

    let res: VerifyResponse = serde_json::from_value(json!({ "user_id": "" })).unwrap();
    assert_eq!(res.user_id(), None);

    let res: VerifyResponse = serde_json::from_value(json!({ "email": "a@b.c" })).unwrap();
    assert_eq!(res.user_id(), None);
}

#[test]
fn it_keeps_extra_verify_fields() {
    let res: VerifyResponse =
        serde_json::from_value(json!({ "user_id": "u-1", "email": "a@b.c", "plan": "pro" }))
            .unwrap();

    assert_eq!(res.email, Some("a@b.c".to_string()));
    assert_eq!(res.extra.get("plan"), Some(&json!("pro")));
}

#[test]
fn it_follows_truthiness_for_connected() {
    let cases = vec![
        (json!({ "connected": true }), true),
        (json!({ "connected": false }), false),
        (json!({ "connected": 1 }), true),
        (json!({ "connected": 0 }), false),
        (json!({ "connected": "" }), false),
        (json!({ "connected": "yes" }), true),
        (json!({}), false),
    ];

    for (body, expected) in cases {
        let res: StatusResponse = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(res.is_connected(), expected, "{body}");
    }
}

#[test]
fn it_reads_error_detail() {
    let res: ErrorResponse = serde_json::from_value(json!({ "detail": "bad token" })).unwrap();
    assert_eq!(res.message(), Some("bad token".to_string()));

    let res: ErrorResponse = serde_json::from_value(json!({ "detail": "" })).unwrap();
    assert_eq!(res.message(), None);

    let res: ErrorResponse = serde_json::from_value(json!({})).unwrap();
    assert_eq!(res.message(), None);

    let res: ErrorResponse =
        serde_json::from_value(json!({ "detail": [{ "msg": "field required" }] })).unwrap();
    assert_eq!(res.message(), Some(r#"[{"msg":"field required"}]"#.to_string()));
}
