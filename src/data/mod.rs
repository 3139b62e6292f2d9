//! Fixture data access: typed records and the CSV-backed store.

pub mod models;
pub mod store;
