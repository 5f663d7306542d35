// Password hashing.

use bcrypt::{hash, verify};

use crate::error::{AuthError, AuthResult};
use crate::options::PasswordOptions;

/// Salted, irreversible password hashing (bcrypt).
///
/// Hashing is CPU-bound, so both operations run on tokio's blocking pool.
#[derive(Clone, Debug)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(options: &PasswordOptions) -> Self {
        Self { cost: options.cost }
    }

    pub async fn hash(&self, password: &str) -> AuthResult<String> {
        let password = password.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Compare a plaintext password against a stored hash.
    ///
    /// A mismatch and an unreadable hash both report `InvalidCredentials`.
    pub async fn verify(&self, password: &str, password_hash: &str) -> AuthResult<()> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();
        let ok = tokio::task::spawn_blocking(move || verify(password, &password_hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .unwrap_or(false);
        if !ok {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(())
    }

    /// Fail a login for an unknown account after the same bcrypt work a
    /// stored hash would cost, so response timing does not reveal which
    /// emails exist.
    pub async fn reject(&self, password: &str) -> AuthResult<()> {
        self.hash(password).await?;
        Err(AuthError::InvalidCredentials)
    }
}
