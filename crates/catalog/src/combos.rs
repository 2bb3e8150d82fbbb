//! Select-list (combo) option sets for server-rendered forms.
//!
//! Each query returns label/value pairs sorted alphabetically by label, with
//! a synthetic "please choose" sentinel prepended (value `"0"`). Cascading
//! filters are plain lookups keyed by parent identifier; an unmatched parent
//! simply yields the sentinel alone.

use serde::Serialize;
use sqlx::SqlitePool;

use skyfare_core::{CategoryId, CountryId, StateId};

use crate::db::RepositoryError;

/// Value carried by every sentinel option.
pub const SENTINEL_VALUE: &str = "0";

const SELECT_CATEGORY_PROMPT: &str = "[Seleccione una categoria...";
const SELECT_COUNTRY_PROMPT: &str = "[Seleccione una pais...";
const SELECT_STATE_PROMPT: &str = "[Seleccione una departamento/estado ...";
const SELECT_CITY_PROMPT: &str = "[Seleccione una ciudad ...";

/// A single dropdown option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComboOption {
    /// Text shown to the user.
    pub label: String,
    /// Value submitted by the form.
    pub value: String,
}

impl ComboOption {
    fn sentinel(prompt: &str) -> Self {
        Self {
            label: prompt.to_owned(),
            value: SENTINEL_VALUE.to_owned(),
        }
    }
}

/// Label/value row shared by every combo query.
#[derive(Debug, sqlx::FromRow)]
struct ComboRow {
    id: i32,
    name: String,
}

impl From<ComboRow> for ComboOption {
    fn from(row: ComboRow) -> Self {
        Self {
            label: row.name,
            value: row.id.to_string(),
        }
    }
}

fn with_sentinel(prompt: &str, rows: Vec<ComboRow>) -> Vec<ComboOption> {
    let mut list: Vec<ComboOption> = Vec::with_capacity(rows.len() + 1);
    list.push(ComboOption::sentinel(prompt));
    list.extend(rows.into_iter().map(ComboOption::from));
    list
}

/// Read-only combo queries over the catalog store.
pub struct CombosHelper<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CombosHelper<'a> {
    /// Create a new combos helper.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All categories, alphabetical by label.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<ComboOption>, RepositoryError> {
        let rows =
            sqlx::query_as::<_, ComboRow>("SELECT id, name FROM categories ORDER BY name ASC")
                .fetch_all(self.pool)
                .await?;

        Ok(with_sentinel(SELECT_CATEGORY_PROMPT, rows))
    }

    /// All categories whose id is not in `filter`, alphabetical by label.
    ///
    /// Deliberately a full load-then-filter rather than a pushed-down query,
    /// matching how callers hand over already-selected categories.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories_excluding(
        &self,
        filter: &[CategoryId],
    ) -> Result<Vec<ComboOption>, RepositoryError> {
        let mut rows = sqlx::query_as::<_, ComboRow>("SELECT id, name FROM categories")
            .fetch_all(self.pool)
            .await?;

        rows.retain(|row| !filter.iter().any(|id| id.as_i32() == row.id));
        rows.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(with_sentinel(SELECT_CATEGORY_PROMPT, rows))
    }

    /// All countries, alphabetical by label.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn countries(&self) -> Result<Vec<ComboOption>, RepositoryError> {
        let rows =
            sqlx::query_as::<_, ComboRow>("SELECT id, name FROM countries ORDER BY name ASC")
                .fetch_all(self.pool)
                .await?;

        Ok(with_sentinel(SELECT_COUNTRY_PROMPT, rows))
    }

    /// States of one country, alphabetical by label.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn states(&self, country_id: CountryId) -> Result<Vec<ComboOption>, RepositoryError> {
        let rows = sqlx::query_as::<_, ComboRow>(
            "SELECT id, name FROM states WHERE country_id = ? ORDER BY name ASC",
        )
        .bind(country_id)
        .fetch_all(self.pool)
        .await?;

        Ok(with_sentinel(SELECT_STATE_PROMPT, rows))
    }

    /// Cities of one state, alphabetical by label.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn cities(&self, state_id: StateId) -> Result<Vec<ComboOption>, RepositoryError> {
        let rows = sqlx::query_as::<_, ComboRow>(
            "SELECT id, name FROM cities WHERE state_id = ? ORDER BY name ASC",
        )
        .bind(state_id)
        .fetch_all(self.pool)
        .await?;

        Ok(with_sentinel(SELECT_CITY_PROMPT, rows))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(id: i32, name: &str) -> ComboRow {
        ComboRow {
            id,
            name: name.to_owned(),
        }
    }

    #[test]
    fn test_sentinel_is_first_with_value_zero() {
        let list = with_sentinel(SELECT_CATEGORY_PROMPT, vec![row(1, "Premium")]);
        let head = list.first().unwrap();
        assert_eq!(head.value, SENTINEL_VALUE);
        assert_eq!(head.label, SELECT_CATEGORY_PROMPT);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_sentinel_alone_for_empty_rows() {
        let list = with_sentinel(SELECT_CITY_PROMPT, Vec::new());
        assert_eq!(list.len(), 1);
        assert_eq!(list.first().unwrap().value, SENTINEL_VALUE);
    }

    #[test]
    fn test_option_value_is_stringified_id() {
        let option = ComboOption::from(row(42, "Económica"));
        assert_eq!(option.value, "42");
        assert_eq!(option.label, "Económica");
    }

    #[test]
    fn test_serializes_as_label_value_pair() {
        let option = ComboOption::from(row(7, "Premium"));
        let json = serde_json::to_string(&option).unwrap();
        assert_eq!(json, r#"{"label":"Premium","value":"7"}"#);
    }
}
