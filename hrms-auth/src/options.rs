// Authentication options and configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// JWT signing algorithms. Tokens are signed with a shared HMAC secret.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum JwtAlgorithm {
    /// HMAC using SHA-256
    #[default]
    HS256,
}

/// Main authentication configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AuthOptions {
    /// Session token configuration
    pub jwt: JwtOptions,
    /// Password hashing configuration
    pub password: PasswordOptions,
}

impl AuthOptions {
    /// Options with the given signing secret and defaults elsewhere.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        let mut opts = Self::default();
        opts.jwt.secret = Some(secret.into());
        opts
    }

    /// Validate the entire authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        self.jwt
            .validate()
            .map_err(|e| format!("JWT validation failed: {}", e))?;
        self.password
            .validate()
            .map_err(|e| format!("Password validation failed: {}", e))?;
        Ok(())
    }
}

/// Session token configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JwtOptions {
    /// JWT signing algorithm
    pub algorithm: JwtAlgorithm,
    /// Token issuer (iss claim)
    pub issuer: String,
    /// Token audience (aud claim)
    pub audience: String,
    /// Session token lifetime
    #[serde(with = "humantime_serde")]
    pub expires_in: Duration,
    /// JWT signing secret
    pub secret: Option<String>,
}

impl Default for JwtOptions {
    fn default() -> Self {
        Self {
            algorithm: JwtAlgorithm::default(),
            issuer: "hrms".to_string(),
            audience: "hrms-api".to_string(),
            expires_in: Duration::from_secs(8 * 3600), // 8 hours
            secret: None,
        }
    }
}

impl JwtOptions {
    pub fn validate(&self) -> Result<(), String> {
        match self.secret.as_deref() {
            None => return Err("A JWT secret must be provided".to_string()),
            Some(s) if s.trim().is_empty() => return Err("JWT secret cannot be empty".to_string()),
            Some(_) => {}
        }
        if self.issuer.trim().is_empty() {
            return Err("JWT issuer cannot be empty".to_string());
        }
        if self.audience.trim().is_empty() {
            return Err("JWT audience cannot be empty".to_string());
        }
        if self.expires_in.is_zero() {
            return Err("Token lifetime must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Password hashing configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordOptions {
    /// bcrypt work factor (4..=31)
    pub cost: u32,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self { cost: 10 }
    }
}

impl PasswordOptions {
    pub fn validate(&self) -> Result<(), String> {
        if !(4..=31).contains(&self.cost) {
            return Err(format!("bcrypt cost must be between 4 and 31, got {}", self.cost));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_need_a_secret() {
        let opts = AuthOptions::default();
        assert!(opts.validate().is_err());
        assert!(AuthOptions::with_secret("s3cret").validate().is_ok());
    }

    #[test]
    fn default_lifetime_is_eight_hours() {
        assert_eq!(JwtOptions::default().expires_in, Duration::from_secs(28_800));
    }

    #[test]
    fn bcrypt_cost_is_bounded() {
        let mut opts = AuthOptions::with_secret("s3cret");
        opts.password.cost = 3;
        assert!(opts.validate().is_err());
    }
}
