//! hrms-auth: session tokens and password hashing for HRMS.

pub mod error;
pub mod jwt;
pub mod options;
pub mod password;

pub use error::{AuthError, AuthResult};
pub use jwt::{parse_authorization, Claims, TokenCodec};
pub use options::{AuthOptions, JwtAlgorithm, JwtOptions, PasswordOptions};
pub use password::PasswordHasher;
