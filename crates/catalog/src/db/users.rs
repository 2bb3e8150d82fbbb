//! User and role repository.

use std::str::FromStr;

use sqlx::SqlitePool;
use uuid::Uuid;

use skyfare_core::{CityId, Email, RoleId, UserId};

use super::RepositoryError;
use crate::models::{AccountStatus, NewUser, User, UserType};

/// Internal row type for user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: UserId,
    first_name: String,
    last_name: String,
    email: Email,
    phone: String,
    address: String,
    document: String,
    city_id: Option<CityId>,
    image_id: String,
    user_type: String,
    status: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let image_id = Uuid::parse_str(&row.image_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid image id in database: {e}"))
        })?;
        let user_type = UserType::from_str(&row.user_type)
            .map_err(RepositoryError::DataCorruption)?;
        let status = AccountStatus::from_str(&row.status)
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            document: row.document,
            city_id: row.city_id,
            image_id,
            user_type,
            status,
        })
    }
}

const USER_COLUMNS: &str = "id, first_name, last_name, email, phone, address, \
                            document, city_id, image_id, user_type, status";

/// Repository for user and role database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Count users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Get a user by email (the login name).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Insert a user with an already-hashed password, returning the stored
    /// record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(
        &self,
        user: &NewUser,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users \
             (first_name, last_name, email, phone, address, document, city_id, \
              image_id, user_type, password_hash, status) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(&user.document)
        .bind(user.city_id)
        .bind(user.image_id.to_string())
        .bind(user.user_type.as_str())
        .bind(password_hash)
        .bind(AccountStatus::Registered.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Fetch the stored password hash for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn password_hash(&self, id: UserId) -> Result<String, RepositoryError> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Store a pending email-confirmation token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_confirmation_token(
        &self,
        id: UserId,
        token: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET confirmation_token = ? WHERE id = ?")
            .bind(token)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Fetch the pending confirmation token, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn confirmation_token(&self, id: UserId) -> Result<Option<String>, RepositoryError> {
        sqlx::query_scalar::<_, Option<String>>(
            "SELECT confirmation_token FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Mark a user's account as confirmed and clear the pending token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn mark_confirmed(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET status = ?, confirmation_token = NULL WHERE id = ?",
        )
        .bind(AccountStatus::Confirmed.as_str())
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Create a role if it does not exist yet, returning its ID either way.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn ensure_role(&self, name: &str) -> Result<RoleId, RepositoryError> {
        sqlx::query("INSERT OR IGNORE INTO roles (name) VALUES (?)")
            .bind(name)
            .execute(self.pool)
            .await?;

        let id = sqlx::query_scalar::<_, RoleId>("SELECT id FROM roles WHERE name = ?")
            .bind(name)
            .fetch_one(self.pool)
            .await?;

        Ok(id)
    }

    /// Add a user to a role; a no-op when the membership already exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add_to_role(&self, user_id: UserId, role_id: RoleId) -> Result<(), RepositoryError> {
        sqlx::query("INSERT OR IGNORE INTO user_roles (user_id, role_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(role_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// List role names for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn roles_of(&self, user_id: UserId) -> Result<Vec<String>, RepositoryError> {
        let roles = sqlx::query_scalar::<_, String>(
            "SELECT r.name FROM roles r \
             JOIN user_roles ur ON ur.role_id = r.id \
             WHERE ur.user_id = ? ORDER BY r.name ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(roles)
    }

    /// Count roles.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_roles(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM roles")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
