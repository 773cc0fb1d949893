use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Builds an unsigned JWT carrying `claims` as its payload, the way an identity
/// provider's widget hands credentials over.
pub fn jwt_fixture(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());

    return format!("{header}.{payload}.signature");
}

pub fn profile_claims_fixture() -> serde_json::Value {
    return serde_json::json!({
        "iss": "https://accounts.google.com",
        "sub": "110248495921238986420",
        "email": "dana@example.com",
        "name": "Dana Scully",
        "picture": "https://example.com/dana.png",
    });
}
