//! Skyfare Catalog - data and admin-support layer.
//!
//! The slice of the application that owns the relational entities, the
//! one-time startup seed, and the select-list (combo) helpers the
//! server-rendered forms consume.
//!
//! # Modules
//!
//! - [`models`] - Domain entities (geography, catalog, users)
//! - [`db`] - `SQLite` pool, migrations, and repositories
//! - [`services`] - Identity and object-storage collaborators
//! - [`seed`] - Idempotent startup seeding
//! - [`combos`] - Label/value option sets for dropdowns
//! - [`config`] - Environment-driven configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod combos;
pub mod config;
pub mod db;
pub mod models;
pub mod seed;
pub mod services;
