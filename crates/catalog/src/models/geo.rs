//! Reference geography: countries, states, cities.

use serde::Serialize;

use skyfare_core::{CityId, CountryId, StateId};

/// A country (domain type). Owns an ordered set of states.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Country {
    /// Unique country ID.
    pub id: CountryId,
    /// Country display name.
    pub name: String,
}

/// A state or department within a country.
///
/// Carries its loaded cities so display properties can be derived without
/// extra queries.
#[derive(Debug, Clone, Serialize)]
pub struct State {
    /// Unique state ID.
    pub id: StateId,
    /// Country this state belongs to.
    pub country_id: CountryId,
    /// State display name.
    pub name: String,
    /// Cities owned by this state, in insertion order.
    pub cities: Vec<City>,
}

impl State {
    /// Number of cities in this state, zero when none are loaded or exist.
    #[must_use]
    pub fn cities_number(&self) -> usize {
        self.cities.len()
    }
}

/// A city within a state.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct City {
    /// Unique city ID.
    pub id: CityId,
    /// State this city belongs to.
    pub state_id: StateId,
    /// City display name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(id: i32, state_id: i32, name: &str) -> City {
        City {
            id: CityId::new(id),
            state_id: StateId::new(state_id),
            name: name.to_owned(),
        }
    }

    #[test]
    fn test_cities_number_counts_loaded_cities() {
        let state = State {
            id: StateId::new(1),
            country_id: CountryId::new(1),
            name: "Antioquia".to_owned(),
            cities: vec![city(1, 1, "Medellín"), city(2, 1, "Itagüí")],
        };
        assert_eq!(state.cities_number(), 2);
    }

    #[test]
    fn test_cities_number_zero_when_empty() {
        let state = State {
            id: StateId::new(2),
            country_id: CountryId::new(1),
            name: "Bogotá".to_owned(),
            cities: Vec::new(),
        };
        assert_eq!(state.cities_number(), 0);
    }
}
