use super::*;
use jsonwebtoken::{EncodingKey, Header, encode};
use std::env;

fn set_env_vars() {
    unsafe {
        env::set_var("JWT_AUTH_SECRET", "supersecretjwtsecretforunittesting123");
    }
}

fn issue_token(secret: &str, role: &str, exp: usize) -> String {
    let claims = AuthClaims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        role: role.to_string(),
        email: Some("test@example.com".to_string()),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[test]
fn test_validate_bearer_jwt_success() {
    set_env_vars();
    let token = issue_token("supersecretjwtsecretforunittesting123", "member", 9999999999);

    let claims = validate_bearer_jwt(&token).expect("Valid token should pass");
    assert_eq!(claims.sub, "123e4567-e89b-12d3-a456-426614174000");
    assert_eq!(claims.role, "member");
    assert_eq!(claims.email, Some("test@example.com".to_string()));
}

#[test]
fn test_validate_bearer_jwt_expired() {
    set_env_vars();
    let token = issue_token("supersecretjwtsecretforunittesting123", "member", 1);

    let result = validate_bearer_jwt(&token);
    assert!(result.is_err());
}

#[test]
fn test_validate_bearer_jwt_invalid_signature() {
    set_env_vars();
    let token = issue_token("wrongsecret", "admin", 9999999999);

    let result = validate_bearer_jwt(&token);
    assert!(result.is_err());
}
