//! Geography repository: countries, states, cities.

use sqlx::SqlitePool;

use skyfare_core::{CityId, CountryId, StateId};

use super::RepositoryError;
use crate::models::{City, Country, State};

/// Internal row type for state queries (cities are loaded separately).
#[derive(Debug, sqlx::FromRow)]
struct StateRow {
    id: StateId,
    country_id: CountryId,
    name: String,
}

/// Repository for reference-geography database operations.
pub struct GeoRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GeoRepository<'a> {
    /// Create a new geography repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Count countries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_countries(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM countries")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Insert a country, returning its new ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_country(&self, name: &str) -> Result<CountryId, RepositoryError> {
        let id = sqlx::query_scalar::<_, CountryId>(
            "INSERT INTO countries (name) VALUES (?) RETURNING id",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Insert a state under a country, returning its new ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_state(
        &self,
        country_id: CountryId,
        name: &str,
    ) -> Result<StateId, RepositoryError> {
        let id = sqlx::query_scalar::<_, StateId>(
            "INSERT INTO states (country_id, name) VALUES (?, ?) RETURNING id",
        )
        .bind(country_id)
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Insert a city under a state, returning its new ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_city(
        &self,
        state_id: StateId,
        name: &str,
    ) -> Result<CityId, RepositoryError> {
        let id = sqlx::query_scalar::<_, CityId>(
            "INSERT INTO cities (state_id, name) VALUES (?, ?) RETURNING id",
        )
        .bind(state_id)
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// First city by insertion order, used as the default city for demo users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn first_city(&self) -> Result<Option<City>, RepositoryError> {
        let city = sqlx::query_as::<_, City>(
            "SELECT id, state_id, name FROM cities ORDER BY id ASC LIMIT 1",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(city)
    }

    /// Look up a country by exact name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_country_by_name(&self, name: &str) -> Result<Option<Country>, RepositoryError> {
        let country = sqlx::query_as::<_, Country>("SELECT id, name FROM countries WHERE name = ?")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;

        Ok(country)
    }

    /// Look up a state by exact name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_state_by_name(&self, name: &str) -> Result<Option<State>, RepositoryError> {
        let row = sqlx::query_as::<_, StateRow>(
            "SELECT id, country_id, name FROM states WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.load_state(row).await?)),
            None => Ok(None),
        }
    }

    /// Get a state with its cities loaded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_state(&self, id: StateId) -> Result<Option<State>, RepositoryError> {
        let row = sqlx::query_as::<_, StateRow>(
            "SELECT id, country_id, name FROM states WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.load_state(row).await?)),
            None => Ok(None),
        }
    }

    async fn load_state(&self, row: StateRow) -> Result<State, RepositoryError> {
        let cities = sqlx::query_as::<_, City>(
            "SELECT id, state_id, name FROM cities WHERE state_id = ? ORDER BY id ASC",
        )
        .bind(row.id)
        .fetch_all(self.pool)
        .await?;

        Ok(State {
            id: row.id,
            country_id: row.country_id,
            name: row.name,
            cities,
        })
    }
}
