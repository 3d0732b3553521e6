use appts_booking::{AppointmentStore, CalendarDay, RequestContext, StoreError};
use appts_config::DatabaseConfig;
use appts_db::{DbClient, SqlAppointmentStore};
use std::sync::Arc;
use tempfile::TempDir;

// Each test gets its own database file; the TempDir must outlive the store
async fn setup_store() -> (TempDir, SqlAppointmentStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("appointments.db");
    let config = DatabaseConfig {
        url: format!("sqlite://{}", path.display()),
        max_connections: 4,
    };

    let client = DbClient::from_config(&config)
        .await
        .expect("Failed to connect to test database");
    let store = SqlAppointmentStore::new(client);
    store.init_schema().await.expect("Failed to init schema");
    (dir, store)
}

fn day(d: u32) -> CalendarDay {
    CalendarDay::from_ymd(2024, 7, d).unwrap()
}

#[tokio::test]
async fn test_insert_and_find_by_day() {
    let (_dir, store) = setup_store().await;
    let ctx = RequestContext::new();

    let stored = store.insert(&ctx, "Ada", "Lovelace", day(4)).await.unwrap();
    assert!(stored.id > 0);
    assert_eq!(stored.first_name, "Ada");
    assert_eq!(stored.last_name, "Lovelace");
    assert_eq!(stored.day, day(4));

    let found = store.find_by_day(&ctx, day(4)).await.unwrap();
    assert_eq!(found, Some(stored));
    assert_eq!(store.find_by_day(&ctx, day(5)).await.unwrap(), None);
}

#[tokio::test]
async fn test_init_schema_is_idempotent() {
    let (_dir, store) = setup_store().await;
    store.init_schema().await.unwrap();
    assert!(store.db_client().is_healthy().await);
}

#[tokio::test]
async fn test_duplicate_day_is_a_conflict() {
    let (_dir, store) = setup_store().await;
    let ctx = RequestContext::new();

    store.insert(&ctx, "Ada", "Lovelace", day(4)).await.unwrap();
    let err = store.insert(&ctx, "Alan", "Turing", day(4)).await.unwrap_err();

    assert!(matches!(err, StoreError::Conflict(d) if d == day(4)));
    let kept = store.find_by_day(&ctx, day(4)).await.unwrap().unwrap();
    assert_eq!(kept.first_name, "Ada");
}

#[tokio::test]
async fn test_cancelled_context_commits_nothing() {
    let (_dir, store) = setup_store().await;
    let cancelled = RequestContext::new();
    cancelled.cancel();

    let err = store
        .insert(&cancelled, "Ada", "Lovelace", day(6))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Interrupted));

    let ctx = RequestContext::new();
    assert_eq!(store.find_by_day(&ctx, day(6)).await.unwrap(), None);
    // The day is still free for the next caller
    assert!(store.insert(&ctx, "Alan", "Turing", day(6)).await.is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_for_one_day_yield_single_winner() {
    let (_dir, store) = setup_store().await;
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let ctx = RequestContext::new();
                let first_name = format!("Guest{i}");
                let result = store.insert(&ctx, &first_name, "Racer", day(4)).await;
                result
            })
        })
        .collect();

    let mut booked = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => booked += 1,
            Err(StoreError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected store error: {other}"),
        }
    }

    assert_eq!(booked, 1);
    assert_eq!(conflicts, 7);
}
