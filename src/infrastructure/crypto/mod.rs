//! Credential hashing and token issuance

pub mod jwt;
pub mod password;

pub use jwt::{AccessClaims, IssuedAccessToken, JwtConfig, TokenIssuer};
pub use password::{BcryptHasher, CredentialHasher, PasswordVerification};
