//! Identity service: registration, roles, email confirmation.
//!
//! Mirrors the contract the seed routine consumes: `get_user`, `add_user`,
//! `add_user_to_role`, `check_role`, token generation and confirmation.
//! Registration → confirmation is an explicit state machine on the user row
//! ([`crate::models::AccountStatus`]), not something inferred from side
//! effects.

use rand::{Rng, distr::Alphanumeric};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use skyfare_core::{Email, RoleId};

use crate::db::{RepositoryError, UserRepository};
use crate::models::{NewUser, User};

/// Length of generated email-confirmation tokens.
const CONFIRMATION_TOKEN_LENGTH: usize = 32;

/// Errors that can occur in identity operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Underlying repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// The blocking hash task was cancelled or panicked.
    #[error("hash task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Supplied confirmation token does not match the pending one.
    #[error("invalid confirmation token")]
    InvalidToken,
}

/// Identity operations over the users and roles tables.
pub struct IdentityService<'a> {
    users: UserRepository<'a>,
}

impl<'a> IdentityService<'a> {
    /// Create a new identity service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Get a user by email (the login name).
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Repository`] if the lookup fails.
    pub async fn get_user(&self, email: &Email) -> Result<Option<User>, IdentityError> {
        Ok(self.users.find_by_email(email).await?)
    }

    /// Register a user with the given plain-text password.
    ///
    /// The password is bcrypt-hashed on a blocking task before it reaches
    /// the database. The stored account starts in the registered state.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Hash`] if hashing fails and
    /// [`IdentityError::Repository`] on conflict or database failure.
    pub async fn add_user(&self, user: &NewUser, password: &str) -> Result<User, IdentityError> {
        let password = password.to_owned();
        let hash =
            tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
                .await??;

        let user = self.users.insert(user, &hash).await?;
        info!(email = %user.email, "registered user");
        Ok(user)
    }

    /// Verify a plain-text password against the stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Repository`] if the user row is missing and
    /// [`IdentityError::Hash`] if the stored hash is malformed.
    pub async fn validate_credentials(
        &self,
        user: &User,
        password: &str,
    ) -> Result<bool, IdentityError> {
        let hash = self.users.password_hash(user.id).await?;
        let password = password.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(matches)
    }

    /// Create a role if it does not exist yet. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Repository`] if the query fails.
    pub async fn check_role(&self, role_name: &str) -> Result<RoleId, IdentityError> {
        Ok(self.users.ensure_role(role_name).await?)
    }

    /// Add a user to a named role, creating the role if needed.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Repository`] if a query fails.
    pub async fn add_user_to_role(&self, user: &User, role_name: &str) -> Result<(), IdentityError> {
        let role_id = self.users.ensure_role(role_name).await?;
        self.users.add_to_role(user.id, role_id).await?;
        Ok(())
    }

    /// Generate and store an email-confirmation token for a user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Repository`] if storing the token fails.
    pub async fn generate_email_confirmation_token(
        &self,
        user: &User,
    ) -> Result<String, IdentityError> {
        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(CONFIRMATION_TOKEN_LENGTH)
            .map(char::from)
            .collect();

        self.users.set_confirmation_token(user.id, &token).await?;
        Ok(token)
    }

    /// Consume a confirmation token, moving the account to the confirmed
    /// state and clearing the token.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidToken`] when no token is pending or
    /// the supplied one does not match.
    pub async fn confirm_email(&self, user: &User, token: &str) -> Result<(), IdentityError> {
        let pending = self.users.confirmation_token(user.id).await?;

        match pending {
            Some(ref stored) if stored == token => {
                self.users.mark_confirmed(user.id).await?;
                info!(email = %user.email, "confirmed user email");
                Ok(())
            }
            _ => Err(IdentityError::InvalidToken),
        }
    }
}
