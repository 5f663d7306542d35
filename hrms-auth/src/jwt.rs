// Session token codec.

use chrono::Utc;
use hrms_core::{Role, TenantContext};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};
use crate::options::{JwtAlgorithm, JwtOptions};

/// Session token payload.
///
/// Carries the caller identity (`id`, `organizationId`, `role`, `email`) plus
/// the registered claims used for validation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub id: i64,
    pub organization_id: i64,
    pub role: Role,
    pub email: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    pub fn tenant_context(&self) -> TenantContext {
        TenantContext::new(self.organization_id, self.id, self.role, self.email.clone())
    }
}

/// Pure sign/verify capability, independent of transport.
#[derive(Clone, Debug)]
pub struct TokenCodec {
    options: JwtOptions,
    secret: String,
}

impl TokenCodec {
    pub fn new(options: JwtOptions) -> AuthResult<Self> {
        let secret = options
            .secret
            .clone()
            .filter(|s| !s.trim().is_empty())
            .ok_or(AuthError::SecretNotConfigured)?;
        Ok(Self { options, secret })
    }

    fn algorithm(&self) -> Algorithm {
        match self.options.algorithm {
            JwtAlgorithm::HS256 => Algorithm::HS256,
        }
    }

    /// Build the claims for a caller, expiring after the configured lifetime.
    pub fn claims_for(&self, identity: &TenantContext) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            id: identity.user_id,
            organization_id: identity.org_id(),
            role: identity.role,
            email: identity.email.clone(),
            iss: self.options.issuer.clone(),
            aud: self.options.audience.clone(),
            iat: now,
            exp: now + self.options.expires_in.as_secs() as i64,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Issue a fresh session token for a caller.
    pub fn issue(&self, identity: &TenantContext) -> AuthResult<String> {
        self.sign(&self.claims_for(identity))
    }

    pub fn sign(&self, claims: &Claims) -> AuthResult<String> {
        let header = Header::new(self.algorithm());
        encode(&header, claims, &EncodingKey::from_secret(self.secret.as_bytes()))
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify signature, issuer, audience and expiry; return the claims.
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::new(self.algorithm());
        validation.leeway = 0;
        validation.set_issuer(&[self.options.issuer.as_str()]);
        validation.set_audience(&[self.options.audience.as_str()]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            JwtErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken(e.to_string()),
        })
    }
}

/// Accepted `Authorization` schemes.
const SCHEMES: [&str; 2] = ["Bearer", "JWT"];

/// Extract the token from an `Authorization` header value.
///
/// Matches `<scheme> <token>` for the accepted schemes; anything else
/// (empty, unknown scheme, missing token) yields `None`.
pub fn parse_authorization(value: &str) -> Option<&str> {
    let value = value.trim();
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    SCHEMES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(scheme.trim()))
        .then_some(token)
}
