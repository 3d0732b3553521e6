// File: crates/appts_booking/src/store.rs
use std::collections::BTreeMap;
use std::sync::Mutex;

use appts_common::{BoxFuture, BoxedError};
use tracing::debug;

use crate::calendar_day::CalendarDay;
use crate::context::RequestContext;
use crate::error::StoreError;
use crate::models::Appointment;

/// Durable storage holding at most one appointment per day.
///
/// Implementations enforce the one-per-day rule atomically with respect to
/// concurrent writers: of any number of concurrent inserts for one day, at
/// most one succeeds and every other returns [`StoreError::Conflict`].
pub trait AppointmentStore: Send + Sync {
    /// Persists a new appointment for `day`.
    fn insert<'a>(
        &'a self,
        ctx: &'a RequestContext,
        first_name: &'a str,
        last_name: &'a str,
        day: CalendarDay,
    ) -> BoxFuture<'a, Appointment, StoreError>;

    /// Returns the committed appointment for `day`, if any.
    fn find_by_day<'a>(
        &'a self,
        ctx: &'a RequestContext,
        day: CalendarDay,
    ) -> BoxFuture<'a, Option<Appointment>, StoreError>;
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    by_day: BTreeMap<CalendarDay, Appointment>,
}

/// Process-local store; check and insert happen under one lock acquisition.
#[derive(Debug, Default)]
pub struct InMemoryAppointmentStore {
    inner: Mutex<Inner>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.by_day.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend(BoxedError::msg("in-memory store lock poisoned"))
}

impl AppointmentStore for InMemoryAppointmentStore {
    fn insert<'a>(
        &'a self,
        ctx: &'a RequestContext,
        first_name: &'a str,
        last_name: &'a str,
        day: CalendarDay,
    ) -> BoxFuture<'a, Appointment, StoreError> {
        Box::pin(async move {
            ctx.check().map_err(|_| StoreError::Interrupted)?;

            let mut inner = self.inner.lock().map_err(|_| poisoned())?;
            if inner.by_day.contains_key(&day) {
                return Err(StoreError::Conflict(day));
            }

            inner.last_id += 1;
            let appointment = Appointment {
                id: inner.last_id,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                day,
            };
            inner.by_day.insert(day, appointment.clone());
            debug!(id = appointment.id, %day, "appointment stored in memory");
            Ok(appointment)
        })
    }

    fn find_by_day<'a>(
        &'a self,
        ctx: &'a RequestContext,
        day: CalendarDay,
    ) -> BoxFuture<'a, Option<Appointment>, StoreError> {
        Box::pin(async move {
            ctx.check().map_err(|_| StoreError::Interrupted)?;
            let inner = self.inner.lock().map_err(|_| poisoned())?;
            Ok(inner.by_day.get(&day).cloned())
        })
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// How the scripted store answers inserts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Script {
        /// Delegate to an in-memory store.
        Store,
        /// Fail every insert with a backend error.
        Fail,
        /// Report success but for the day after the requested one.
        WrongDay,
    }

    /// Store double that counts insert attempts.
    pub struct ScriptedStore {
        pub script: Script,
        pub backing: InMemoryAppointmentStore,
        pub inserts: AtomicUsize,
    }

    impl ScriptedStore {
        pub fn new(script: Script) -> Self {
            Self {
                script,
                backing: InMemoryAppointmentStore::new(),
                inserts: AtomicUsize::new(0),
            }
        }

        pub fn inserts(&self) -> usize {
            self.inserts.load(Ordering::SeqCst)
        }
    }

    impl AppointmentStore for ScriptedStore {
        fn insert<'a>(
            &'a self,
            ctx: &'a RequestContext,
            first_name: &'a str,
            last_name: &'a str,
            day: CalendarDay,
        ) -> BoxFuture<'a, Appointment, StoreError> {
            Box::pin(async move {
                self.inserts.fetch_add(1, Ordering::SeqCst);
                match self.script {
                    Script::Store => self.backing.insert(ctx, first_name, last_name, day).await,
                    Script::Fail => Err(StoreError::Backend(BoxedError::msg("disk I/O error"))),
                    Script::WrongDay => {
                        let next = CalendarDay::from(
                            day.as_naive_date().succ_opt().unwrap_or(day.as_naive_date()),
                        );
                        Ok(Appointment {
                            id: 99,
                            first_name: first_name.to_string(),
                            last_name: last_name.to_string(),
                            day: next,
                        })
                    }
                }
            })
        }

        fn find_by_day<'a>(
            &'a self,
            ctx: &'a RequestContext,
            day: CalendarDay,
        ) -> BoxFuture<'a, Option<Appointment>, StoreError> {
            self.backing.find_by_day(ctx, day)
        }
    }
}
