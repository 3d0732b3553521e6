// --- File: crates/appts_holidays/src/lib.rs ---
//! Public holiday lookup against the Nager.Date API.
//!
//! `GET {base_url}/api/v3/PublicHolidays/{year}/{countryCode}` returns every
//! public holiday of a year; a day is a holiday when it appears in that list.

pub mod client;
pub mod error;
pub mod models;

pub use client::NagerHolidayClient;
pub use error::HolidayApiError;
pub use models::PublicHoliday;
