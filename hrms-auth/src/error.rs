use hrms_core::HrError;
use thiserror::Error;

/// Result type for token and password operations
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No access token")]
    MissingToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT secret is not configured")]
    SecretNotConfigured,

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl From<AuthError> for HrError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => HrError::not_authenticated("No token provided"),
            AuthError::TokenExpired | AuthError::InvalidToken(_) => {
                HrError::not_authenticated("Invalid or expired token").with_source(err)
            }
            AuthError::InvalidCredentials => HrError::not_authenticated("Invalid credentials"),
            AuthError::SecretNotConfigured | AuthError::Signing(_) | AuthError::Hashing(_) => {
                HrError::general(err.to_string()).with_source(err)
            }
        }
    }
}
