use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config;
use crate::error::GatewayError;

/// Access level granted by a credential, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Read,
    Edit,
    Full,
}

impl AccessLevel {
    pub fn can_write(self) -> bool {
        self >= AccessLevel::Edit
    }
}

/// Identity claim produced by a successful credential check. Lives for the
/// duration of one request; the orchestrator uses `sub` for logging only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub access: AccessLevel,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: String, access: AccessLevel) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self { sub, access, exp, iat: now.timestamp() }
    }
}

/// Issue a signed bearer token for the given claims.
pub fn issue_token(claims: &Claims) -> Result<String, GatewayError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(GatewayError::internal("JWT secret not configured"));
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| GatewayError::internal(format!("JWT generation error: {}", e)))
}

/// Verifies a bearer credential against a required access level.
///
/// Implementations must keep the Unauthorized/Forbidden distinction as typed
/// error kinds: missing or undecodable credentials are `Unauthorized`, a
/// valid credential lacking the required level is `Forbidden`.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(
        &self,
        authorization: Option<&str>,
        required: AccessLevel,
    ) -> Result<Claims, GatewayError>;
}

/// Verifier backed by the configured HS256 signing secret.
#[derive(Debug, Default, Clone)]
pub struct JwtVerifier;

#[async_trait]
impl CredentialVerifier for JwtVerifier {
    async fn verify(
        &self,
        authorization: Option<&str>,
        required: AccessLevel,
    ) -> Result<Claims, GatewayError> {
        let header = authorization
            .ok_or_else(|| GatewayError::unauthorized("Missing Authorization header"))?;
        let token = extract_bearer(header)?;
        let claims = decode_token(&token)?;

        if claims.access < required {
            return Err(GatewayError::forbidden("Write access required"));
        }

        Ok(claims)
    }
}

/// Extract the token from a `Bearer <token>` header value.
fn extract_bearer(header: &str) -> Result<String, GatewayError> {
    if let Some(token) = header.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err(GatewayError::unauthorized("Empty bearer token"));
        }
        Ok(token.to_string())
    } else {
        Err(GatewayError::unauthorized(
            "Authorization header must use Bearer token format",
        ))
    }
}

/// Validate a token and extract its claims.
fn decode_token(token: &str) -> Result<Claims, GatewayError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(GatewayError::internal("JWT secret not configured"));
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| GatewayError::unauthorized(format!("Invalid bearer token: {}", e)))?;

    Ok(token_data.claims)
}

/// Check login credentials against the configured admin account. Passwords
/// are compared as sha256 digests so the plaintext never sits in config.
pub fn verify_password(username: &str, password: &str) -> bool {
    let security = &config::config().security;
    if security.admin_username.is_empty() || security.admin_password_sha256.is_empty() {
        return false;
    }
    if username != security.admin_username {
        return false;
    }

    let digest = format!("{:x}", Sha256::digest(password.as_bytes()));
    digest == security.admin_password_sha256
}
