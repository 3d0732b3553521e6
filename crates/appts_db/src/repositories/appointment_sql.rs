//! SQL implementation of the appointment store
//!
//! Days are stored as `YYYY-MM-DD` text; SQLx's `Any` driver has no chrono
//! decoding, and the text form keeps the unique index exact.

use crate::error::DbError;
use crate::DbClient;
use appts_booking::{Appointment, AppointmentStore, CalendarDay, RequestContext, StoreError};
use appts_common::BoxFuture;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info, warn};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS appointments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        appointment_date TEXT NOT NULL UNIQUE,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

const INSERT_APPOINTMENT: &str = r#"
    INSERT INTO appointments (first_name, last_name, appointment_date)
    VALUES ($1, $2, $3)
    RETURNING id, first_name, last_name, appointment_date
"#;

const SELECT_BY_DAY: &str = r#"
    SELECT id, first_name, last_name, appointment_date
    FROM appointments
    WHERE appointment_date = $1
"#;

/// Appointment store backed by the `appointments` table.
#[derive(Debug, Clone)]
pub struct SqlAppointmentStore {
    db_client: DbClient,
}

impl SqlAppointmentStore {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub fn db_client(&self) -> &DbClient {
        &self.db_client
    }

    /// Creates the `appointments` table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing appointment schema");
        self.db_client.execute(CREATE_TABLE).await?;
        info!("Appointment schema initialized successfully");
        Ok(())
    }

    async fn insert_in_tx(
        &self,
        ctx: &RequestContext,
        first_name: &str,
        last_name: &str,
        day: CalendarDay,
    ) -> Result<Appointment, StoreError> {
        let mut tx = match ctx.run(self.db_client.begin()).await {
            Ok(tx) => tx.map_err(StoreError::backend)?,
            Err(_) => return Err(StoreError::Interrupted),
        };

        let insert = sqlx::query(INSERT_APPOINTMENT)
            .bind(first_name)
            .bind(last_name)
            .bind(day.to_string())
            .fetch_one(&mut *tx);

        // Dropping an uncommitted transaction rolls it back
        let row = match ctx.run(insert).await {
            Ok(Ok(row)) => row,
            Ok(Err(e)) => {
                let err = DbError::from(e);
                if err.is_unique_violation() {
                    debug!(%day, "appointment day already taken");
                    return Err(StoreError::Conflict(day));
                }
                error!("Failed to insert appointment: {}", err);
                return Err(StoreError::backend(err));
            }
            Err(cause) => {
                warn!(%day, %cause, "appointment insert interrupted, rolling back");
                return Err(StoreError::Interrupted);
            }
        };

        if let Err(cause) = ctx.check() {
            warn!(%day, %cause, "request ended before commit, rolling back");
            if let Err(e) = tx.rollback().await {
                error!("Failed to roll back appointment insert: {}", e);
            }
            return Err(StoreError::Interrupted);
        }

        let appointment = appointment_from_row(&row)?;
        tx.commit().await.map_err(|e| {
            error!("Failed to commit appointment: {}", e);
            StoreError::backend(DbError::TransactionError(e.to_string()))
        })?;

        info!(id = appointment.id, %day, "Appointment created successfully");
        Ok(appointment)
    }

    async fn select_by_day(&self, day: CalendarDay) -> Result<Option<Appointment>, StoreError> {
        let row = sqlx::query(SELECT_BY_DAY)
            .bind(day.to_string())
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find appointment: {}", e);
                StoreError::backend(DbError::QueryError(e.to_string()))
            })?;

        row.as_ref().map(appointment_from_row).transpose()
    }
}

fn appointment_from_row(row: &AnyRow) -> Result<Appointment, StoreError> {
    let decode = |e: sqlx::Error| StoreError::backend(DbError::from(e));
    let raw_day: String = row.try_get("appointment_date").map_err(decode)?;
    let day = CalendarDay::parse(&raw_day).map_err(StoreError::backend)?;

    Ok(Appointment {
        id: row.try_get("id").map_err(decode)?,
        first_name: row.try_get("first_name").map_err(decode)?,
        last_name: row.try_get("last_name").map_err(decode)?,
        day,
    })
}

impl AppointmentStore for SqlAppointmentStore {
    fn insert<'a>(
        &'a self,
        ctx: &'a RequestContext,
        first_name: &'a str,
        last_name: &'a str,
        day: CalendarDay,
    ) -> BoxFuture<'a, Appointment, StoreError> {
        Box::pin(self.insert_in_tx(ctx, first_name, last_name, day))
    }

    fn find_by_day<'a>(
        &'a self,
        ctx: &'a RequestContext,
        day: CalendarDay,
    ) -> BoxFuture<'a, Option<Appointment>, StoreError> {
        Box::pin(async move {
            match ctx.run(self.select_by_day(day)).await {
                Ok(found) => found,
                Err(_) => Err(StoreError::Interrupted),
            }
        })
    }
}
