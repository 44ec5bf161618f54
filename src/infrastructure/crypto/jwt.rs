//! Access and refresh token issuance
//!
//! Access tokens are HS256 JWTs verified without a store lookup. Refresh
//! tokens are 32 random bytes, URL-safe base64 encoded, and only mean
//! something to the refresh token store.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::refresh_token::{RefreshToken, ACCESS_TOKEN_TTL_MINUTES};
use crate::domain::{AdminRole, AuthFailure, DomainError, DomainResult};
use crate::shared::errors::InfraError;

/// Signing configuration, built from `[security]` in the config file
#[derive(Clone)]
pub struct JwtConfig {
    /// HS256 signing key
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

/// Access token claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AccessClaims {
    /// Admin user id
    pub sub: String,
    /// Username
    pub name: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

impl AccessClaims {
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }

    pub fn admin_role(&self) -> Option<AdminRole> {
        self.role.parse().ok()
    }
}

#[derive(Debug, Clone)]
pub struct IssuedAccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct TokenIssuer {
    config: JwtConfig,
}

impl TokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Lifetime of every access token, in seconds.
    pub fn access_token_ttl_secs(&self) -> i64 {
        ACCESS_TOKEN_TTL_MINUTES * 60
    }

    pub fn issue_access_token(
        &self,
        subject_id: i32,
        username: &str,
        role: AdminRole,
        now: DateTime<Utc>,
    ) -> DomainResult<IssuedAccessToken> {
        let expires_at = now + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES);
        let claims = AccessClaims {
            sub: subject_id.to_string(),
            name: username.to_string(),
            role: role.as_str().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(InfraError::from)?;

        Ok(IssuedAccessToken { token, expires_at })
    }

    /// A fresh, unsaved refresh token for `subject_id` expiring in 7 days.
    pub fn issue_refresh_token(&self, subject_id: i32, now: DateTime<Utc>) -> RefreshToken {
        let bytes: [u8; 32] = rand::thread_rng().gen();
        RefreshToken::new(URL_SAFE_NO_PAD.encode(bytes), subject_id, now)
    }

    /// Check signature, issuer and audience, then expiry against `now`.
    pub fn verify_access_token(&self, token: &str, now: DateTime<Utc>) -> DomainResult<AccessClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = false;

        let claims = decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| DomainError::Unauthorized(AuthFailure::InvalidAccessToken))?
        .claims;

        if claims.exp <= now.timestamp() {
            return Err(DomainError::Unauthorized(AuthFailure::ExpiredAccessToken));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(JwtConfig {
            secret: "0123456789abcdef0123456789abcdef".into(),
            issuer: "billboard-api".into(),
            audience: "billboard-admin".into(),
        })
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn access_token_carries_identity_and_expires_in_thirty_minutes() {
        let issuer = issuer();
        let issued = issuer
            .issue_access_token(7, "admin1", AdminRole::SuperAdmin, noon())
            .unwrap();

        let claims = issuer.verify_access_token(&issued.token, noon()).unwrap();
        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.name, "admin1");
        assert_eq!(claims.admin_role(), Some(AdminRole::SuperAdmin));
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert_eq!(claims.iss, "billboard-api");
        assert_eq!(claims.aud, "billboard-admin");
        assert_eq!(issued.expires_at, noon() + Duration::minutes(30));
    }

    #[test]
    fn expired_access_token_is_rejected() {
        let issuer = issuer();
        let issued = issuer.issue_access_token(7, "admin1", AdminRole::Admin, noon()).unwrap();

        let err = issuer
            .verify_access_token(&issued.token, noon() + Duration::minutes(30))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Unauthorized(AuthFailure::ExpiredAccessToken)
        ));
    }

    #[test]
    fn foreign_audience_or_key_is_rejected() {
        let issued = issuer().issue_access_token(7, "admin1", AdminRole::Admin, noon()).unwrap();

        let other_audience = TokenIssuer::new(JwtConfig {
            audience: "someone-else".into(),
            ..issuer().config
        });
        assert!(other_audience.verify_access_token(&issued.token, noon()).is_err());

        let other_key = TokenIssuer::new(JwtConfig {
            secret: "ffffffffffffffffffffffffffffffff".into(),
            ..issuer().config
        });
        assert!(other_key.verify_access_token(&issued.token, noon()).is_err());
    }

    #[test]
    fn refresh_tokens_are_random_and_last_seven_days() {
        let issuer = issuer();
        let a = issuer.issue_refresh_token(7, noon());
        let b = issuer.issue_refresh_token(7, noon());

        assert_ne!(a.token, b.token);
        assert_eq!(a.token.len(), 43);
        assert_eq!(a.expires_at, noon() + Duration::days(7));
        assert_eq!(a.admin_user_id, 7);
        assert!(a.is_active(noon()));
    }
}
