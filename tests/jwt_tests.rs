use chrono::Utc;
use fintrack_backend::config::JwtConfig;
use fintrack_backend::util::jwt::*;

fn create_test_jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::from_test_env()
}

// Test user data
struct TestUser {
    id: String,
    email: String,
}

impl TestUser {
    fn new_user() -> Self {
        Self {
            id: "user123".to_string(),
            email: "user@example.com".to_string(),
        }
    }
}

#[test]
fn test_jwt_utils_creation() {
    let jwt_utils = create_test_jwt_utils();
    assert!(!jwt_utils.jwt_config.jwt_secret.is_empty());
    assert!(jwt_utils.jwt_config.access_token_expiration > 0);
    assert!(jwt_utils.jwt_config.refresh_token_expiration > 0);
}

#[test]
fn test_token_type_as_str() {
    assert_eq!(TokenType::Access.as_str(), "access");
    assert_eq!(TokenType::Refresh.as_str(), "refresh");
}

#[test]
fn test_generate_access_token_success() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let result = jwt_utils.generate_access_token(&user.id, &user.email);
    assert!(result.is_ok());

    let token = result.unwrap();
    assert!(!token.is_empty());

    let claims = jwt_utils.validate_access_token(&token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.token_type, "access");
}

#[test]
fn test_generate_refresh_token_success() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let result = jwt_utils.generate_refresh_token(&user.id, &user.email);
    assert!(result.is_ok());

    let token = result.unwrap();
    assert!(!token.is_empty());

    let claims = jwt_utils.validate_refresh_token(&token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.token_type, "refresh");
}

#[test]
fn test_generate_token_pair_success() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let result = jwt_utils.generate_token_pair(&user.id, &user.email);
    assert!(result.is_ok());

    let token_pair = result.unwrap();
    assert!(!token_pair.access_token.is_empty());
    assert!(!token_pair.refresh_token.is_empty());
    assert_eq!(
        token_pair.expires_in,
        jwt_utils.jwt_config.access_token_expiration * 60
    );
    assert_eq!(token_pair.token_type, "Bearer");

    assert!(jwt_utils.validate_access_token(&token_pair.access_token).is_ok());
    assert!(jwt_utils.validate_refresh_token(&token_pair.refresh_token).is_ok());
}

#[test]
fn test_validate_access_token_wrong_type() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();
    let refresh_token = jwt_utils.generate_refresh_token(&user.id, &user.email).unwrap();

    let result = jwt_utils.validate_access_token(&refresh_token);
    assert!(result.is_err());

    match result.unwrap_err() {
        JwtError::InvalidTokenType { expected, actual } => {
            assert_eq!(expected, "access");
            assert_eq!(actual, "refresh");
        }
        _ => panic!("Expected InvalidTokenType error"),
    }
}

#[test]
fn test_validate_refresh_token_wrong_type() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();
    let access_token = jwt_utils.generate_access_token(&user.id, &user.email).unwrap();

    let result = jwt_utils.validate_refresh_token(&access_token);
    assert!(result.is_err());

    match result.unwrap_err() {
        JwtError::InvalidTokenType { expected, actual } => {
            assert_eq!(expected, "refresh");
            assert_eq!(actual, "access");
        }
        _ => panic!("Expected InvalidTokenType error"),
    }
}

#[test]
fn test_validate_token_with_invalid_secret() {
    let config1 = JwtConfig {
        jwt_secret: "secret1_that_is_long_enough_for_security_requirements_here".to_string(),
        access_token_expiration: 15,
        refresh_token_expiration: 10080,
    };
    let config2 = JwtConfig {
        jwt_secret: "secret2_that_is_long_enough_for_security_requirements_here".to_string(),
        access_token_expiration: 15,
        refresh_token_expiration: 10080,
    };

    let jwt_utils_1 = JwtTokenUtilsImpl::new(config1);
    let jwt_utils_2 = JwtTokenUtilsImpl::new(config2);
    let user = TestUser::new_user();

    let token = jwt_utils_1.generate_access_token(&user.id, &user.email).unwrap();
    let result = jwt_utils_2.validate_access_token(&token);

    assert!(result.is_err());
    match result.unwrap_err() {
        JwtError::DecodingFailed(_) => (),
        _ => panic!("Expected DecodingFailed error"),
    }
}

#[test]
fn test_validate_malformed_token() {
    let jwt_utils = create_test_jwt_utils();
    let invalid_token = "invalid.token.format";

    let result = jwt_utils.validate_access_token(invalid_token);
    assert!(result.is_err());

    match result.unwrap_err() {
        JwtError::DecodingFailed(_) => (),
        _ => panic!("Expected DecodingFailed error"),
    }
}

#[test]
fn test_extract_token_from_header_success() {
    let jwt_utils = create_test_jwt_utils();
    let auth_header = "Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test.token";

    let result = jwt_utils.extract_token_from_header(auth_header);
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test.token");
}

#[test]
fn test_extract_token_from_header_invalid_format() {
    let jwt_utils = create_test_jwt_utils();
    let auth_header = "Invalid header format";

    let result = jwt_utils.extract_token_from_header(auth_header);
    assert!(result.is_err());

    match result.unwrap_err() {
        JwtError::InvalidToken => (),
        _ => panic!("Expected InvalidToken error"),
    }
}

#[test]
fn test_extract_token_from_header_empty_token() {
    let jwt_utils = create_test_jwt_utils();
    let auth_header = "Bearer ";

    let result = jwt_utils.extract_token_from_header(auth_header);
    assert!(result.is_err());

    match result.unwrap_err() {
        JwtError::InvalidToken => (),
        _ => panic!("Expected InvalidToken error"),
    }
}

#[test]
fn test_claims_serialization() {
    let claims = Claims {
        sub: "user123".to_string(),
        email: "user@example.com".to_string(),
        iat: Utc::now().timestamp(),
        exp: Utc::now().timestamp() + 3600,
        token_type: "access".to_string(),
        jti: "unique-id".to_string(),
    };

    let serialized = serde_json::to_string(&claims).unwrap();
    let deserialized: Claims = serde_json::from_str(&serialized).unwrap();

    assert_eq!(claims.sub, deserialized.sub);
    assert_eq!(claims.email, deserialized.email);
    assert_eq!(claims.token_type, deserialized.token_type);
    assert_eq!(claims.jti, deserialized.jti);
}

#[test]
fn test_jwt_error_display() {
    let encoding_error = JwtError::EncodingFailed("test error".to_string());
    assert_eq!(encoding_error.to_string(), "Failed to encode JWT token: test error");

    let decoding_error = JwtError::DecodingFailed("test error".to_string());
    assert_eq!(decoding_error.to_string(), "Failed to decode JWT token: test error");

    let expired_error = JwtError::TokenExpired;
    assert_eq!(expired_error.to_string(), "Token has expired");

    let invalid_token_error = JwtError::InvalidToken;
    assert_eq!(invalid_token_error.to_string(), "Invalid token format");

    let invalid_type_error = JwtError::InvalidTokenType {
        expected: "access".to_string(),
        actual: "refresh".to_string(),
    };
    assert_eq!(
        invalid_type_error.to_string(),
        "Invalid token type: expected access, got refresh"
    );
}

#[test]
fn test_token_contains_jti() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();
    let token = jwt_utils.generate_access_token(&user.id, &user.email).unwrap();
    let claims = jwt_utils.validate_access_token(&token).unwrap();

    // JTI should be a valid UUID
    assert!(!claims.jti.is_empty());
    assert!(uuid::Uuid::parse_str(&claims.jti).is_ok());
}

#[test]
fn test_token_timestamps() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();
    let before_creation = Utc::now().timestamp();

    let token = jwt_utils.generate_access_token(&user.id, &user.email).unwrap();
    let claims = jwt_utils.validate_access_token(&token).unwrap();

    let after_creation = Utc::now().timestamp();

    // iat should be between before and after creation
    assert!(claims.iat >= before_creation);
    assert!(claims.iat <= after_creation);

    // exp should be iat + expiration time in seconds
    let expected_exp = claims.iat + (jwt_utils.jwt_config.access_token_expiration * 60);
    assert_eq!(claims.exp, expected_exp);
}

#[test]
fn test_jwt_token_tamper_detection() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let token = jwt_utils.generate_access_token(&user.id, &user.email).unwrap();

    let tampered_tokens = vec![
        token[..token.len() - 1].to_string(),
        format!("{}x", token),
        token.replace('.', "_"),
        token[1..].to_string(),
        {
            let parts: Vec<&str> = token.split('.').collect();
            format!("{}.tampered.{}", parts[0], parts[2])
        },
        {
            let parts: Vec<&str> = token.split('.').collect();
            format!("{}.{}.tampered", parts[0], parts[1])
        },
    ];

    for tampered_token in tampered_tokens {
        let result = jwt_utils.validate_access_token(&tampered_token);
        assert!(result.is_err(), "Tampered token should be invalid: {}", tampered_token);
    }
}

#[test]
fn test_jwt_jti_uniqueness() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let mut jtis = std::collections::HashSet::new();

    for _ in 0..50 {
        let token = jwt_utils.generate_access_token(&user.id, &user.email).unwrap();
        let claims = jwt_utils.validate_access_token(&token).unwrap();

        assert!(!claims.jti.is_empty(), "JTI should not be empty");
        assert!(jtis.insert(claims.jti.clone()), "JTI should be unique: {}", claims.jti);
    }
}

// Integration test that simulates a real authentication flow
#[test]
fn test_authentication_flow() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    // 1. Generate token pair for login
    let token_pair = jwt_utils.generate_token_pair(&user.id, &user.email).unwrap();

    // 2. Extract access token from authorization header
    let auth_header = format!("Bearer {}", token_pair.access_token);
    let extracted_token = jwt_utils.extract_token_from_header(&auth_header).unwrap();
    assert_eq!(extracted_token, token_pair.access_token);

    // 3. Validate access token
    let access_claims = jwt_utils.validate_access_token(&extracted_token).unwrap();
    assert_eq!(access_claims.sub, user.id);
    assert_eq!(access_claims.email, user.email);

    // 4. Use refresh token to validate (simulating token refresh)
    let refresh_claims = jwt_utils.validate_refresh_token(&token_pair.refresh_token).unwrap();
    assert_eq!(refresh_claims.sub, user.id);
    assert_eq!(refresh_claims.token_type, "refresh");

    // Refresh token should outlive the access token
    assert!(refresh_claims.exp > access_claims.exp);
}

// Test that the trait object surface works
#[test]
fn test_trait_implementation() {
    let jwt_utils: Box<dyn JwtTokenUtils> = Box::new(create_test_jwt_utils());
    let user = TestUser::new_user();

    let token = jwt_utils.generate_access_token(&user.id, &user.email).unwrap();
    let claims = jwt_utils.validate_access_token(&token).unwrap();

    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.token_type, "access");
}
