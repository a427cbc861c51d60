#![doc = "The `pokeden` library crate."]
#![doc = ""]
#![doc = "Accounts, bearer-token authentication, the creature catalog proxy, and the"]
#![doc = "ownership ledger of caught creatures, plus the routes that expose them over HTTP."]
#![doc = "The binary (`main.rs`) reads `Config`, builds the shared handles, and serves `routes::config`."]

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;

use sqlx::migrate::Migrator;

/// Schema migrations embedded from `migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!();
