//! SQL persistence for the appointment booking service
//!
//! This crate provides a pooled database client on top of SQLx's `Any` driver
//! and the SQL implementation of the booking core's `AppointmentStore`.
//!
//! The one-appointment-per-day rule is enforced by a `UNIQUE` constraint on
//! the appointment day, so it holds across processes sharing the database.
//!
//! # Example
//!
//! ```rust,no_run
//! use appts_config::DatabaseConfig;
//! use appts_db::{DbClient, SqlAppointmentStore};
//!
//! async fn setup_store() -> Result<SqlAppointmentStore, Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig {
//!         url: "sqlite://data/appointments.db".to_string(),
//!         max_connections: 5,
//!     };
//!     let db_client = DbClient::from_config(&config).await?;
//!     let store = SqlAppointmentStore::new(db_client);
//!     store.init_schema().await?;
//!     Ok(store)
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

// Re-export the client and repositories for ease of use
pub use client::DbClient;
pub use error::DbError;
pub use repositories::SqlAppointmentStore;
