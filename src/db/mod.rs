//! Database module: models and schema for the booking storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and conversions
//! - `schema.rs`: SQL DDL and seed data for initializing the database
//! - `sqlite.rs`: the pooled storage handle with all queries

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Appointment, AppointmentDetail, AppointmentStatus, Service, SubService};
pub use schema::SQLITE_INIT;
pub use sqlite::{BookingStorage, SqlitePool};
