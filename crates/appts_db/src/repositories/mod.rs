//! Repository modules for database access

pub mod appointment_sql;

pub use appointment_sql::SqlAppointmentStore;
