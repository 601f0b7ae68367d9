use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Session claims issued once the identity provider has accepted the user.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Identity provider subject id.
    pub sub: String,
    /// Display name, used when the user row is first created.
    #[serde(default)]
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

pub fn create_access_token(external_id: &str, name: &str, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: external_id.to_string(),
        name: name.to_string(),
        exp: (now + Duration::seconds(config.jwt_ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create access token: {}", e)))
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_carries_identity() {
        let config = Config::test_default();
        let token = create_access_token("1234", "Ada", &config).unwrap();

        let data = verify_token(&token, &config).unwrap();
        assert_eq!(data.claims.sub, "1234");
        assert_eq!(data.claims.name, "Ada");
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let config = Config::test_default();
        let token = create_access_token("1234", "Ada", &config).unwrap();

        let mut other = Config::test_default();
        other.jwt_secret = "another-secret".into();
        assert!(matches!(verify_token(&token, &other), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let mut config = Config::test_default();
        // Past the default 60s leeway
        config.jwt_ttl_secs = -120;
        let token = create_access_token("1234", "Ada", &config).unwrap();
        assert!(matches!(verify_token(&token, &config), Err(AppError::Unauthorized)));
    }
}
