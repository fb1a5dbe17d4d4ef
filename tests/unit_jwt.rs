use acadex::config::jwt::JwtConfig;
use acadex::utils::jwt::{create_access_token, verify_token};
use uuid::Uuid;

fn test_config() -> JwtConfig {
    JwtConfig {
        secret: "unit-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn token_roundtrip_preserves_claims() {
    let config = test_config();
    let user_id = Uuid::new_v4();

    let token = create_access_token(user_id, "ada@test.com", "Ada", &config).unwrap();
    let claims = verify_token(&token, &config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "ada@test.com");
    assert_eq!(claims.first_name, "Ada");
    assert_eq!(claims.exp, claims.iat + 3600);
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let config = test_config();
    let other = JwtConfig {
        secret: "a-different-secret".to_string(),
        access_token_expiry: 3600,
    };

    let token = create_access_token(Uuid::new_v4(), "ada@test.com", "Ada", &other).unwrap();
    assert!(verify_token(&token, &config).is_err());
}

#[test]
fn garbage_token_is_rejected() {
    let config = test_config();
    assert!(verify_token("not.a.token", &config).is_err());
}
