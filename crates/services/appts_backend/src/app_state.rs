// --- File: crates/services/appts_backend/src/app_state.rs ---
use std::sync::Arc;

use appts_booking::handlers::BookingState;
use appts_booking::routes::booking_state;
use appts_booking::{
    AppointmentStore, BookingService, CachingHolidayOracle, HolidayOracle,
    InMemoryAppointmentStore, SystemClock,
};
use appts_common::log_result;
use appts_config::AppConfig;
use appts_db::{DbClient, DbError, SqlAppointmentStore};
use appts_holidays::{HolidayApiError, NagerHolidayClient};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("database setup failed: {0}")]
    Database(#[from] DbError),
    #[error("holiday client setup failed: {0}")]
    Holidays(#[from] HolidayApiError),
}

/// Application state that is shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` when the appointments live in memory only.
    pub db_client: Option<DbClient>,
    pub booking: Arc<BookingState>,
}

impl AppState {
    /// Wires the booking service from configuration.
    ///
    /// Without a `[database]` section appointments are kept in memory and
    /// lost on restart.
    pub async fn from_config(config: Arc<AppConfig>) -> Result<Self, StartupError> {
        let (db_client, store): (Option<DbClient>, Arc<dyn AppointmentStore>) =
            match config.database.as_ref() {
                Some(db_config) => {
                    let client = DbClient::from_config(db_config).await?;
                    let store = SqlAppointmentStore::new(client.clone());
                    log_result(
                        store.init_schema().await,
                        "Appointment schema ready",
                        "Appointment schema setup failed",
                    )?;
                    (Some(client), Arc::new(store))
                }
                None => {
                    warn!("No database configured, appointments are kept in memory only");
                    (None, Arc::new(InMemoryAppointmentStore::new()))
                }
            };

        let holidays = &config.holidays;
        let nager: Arc<dyn HolidayOracle> = Arc::new(NagerHolidayClient::new(holidays)?);
        let oracle: Arc<dyn HolidayOracle> = if holidays.cache_enabled {
            Arc::new(CachingHolidayOracle::new(nager, holidays.cache_capacity))
        } else {
            nager
        };
        info!(
            region = oracle.region(),
            cache = holidays.cache_enabled,
            "Holiday lookup via {}",
            holidays.base_url
        );

        let service = BookingService::new(Arc::new(SystemClock), oracle, store);
        Ok(Self::new(config, db_client, service))
    }

    pub fn new(config: Arc<AppConfig>, db_client: Option<DbClient>, service: BookingService) -> Self {
        let booking = booking_state(Arc::new(service), &config.server);
        Self {
            config,
            db_client,
            booking,
        }
    }
}
