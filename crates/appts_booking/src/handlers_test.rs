#[cfg(test)]
mod tests {
    use crate::calendar_day::CalendarDay;
    use crate::clock::FixedClock;
    use crate::handlers::{BookingState, CONFLICT_MESSAGE, HOLIDAY_MESSAGE, PAST_DAY_MESSAGE};
    use crate::holidays::mock::ScriptedHolidayOracle;
    use crate::routes::routes;
    use crate::service::BookingService;
    use crate::store::InMemoryAppointmentStore;
    use appts_common::ErrorBody;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app_with(oracle: ScriptedHolidayOracle) -> Router {
        let service = BookingService::new(
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 12, 1, 10, 0, 0).unwrap())),
            Arc::new(oracle),
            Arc::new(InMemoryAppointmentStore::new()),
        );
        routes(Arc::new(BookingState {
            service: Arc::new(service),
            request_timeout: Duration::from_secs(5),
        }))
    }

    fn app() -> Router {
        app_with(ScriptedHolidayOracle::with_holidays([
            CalendarDay::from_ymd(2024, 12, 25).unwrap(),
        ]))
    }

    fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    fn book(date: &str) -> Request<Body> {
        let body = json!({ "firstName": "Ada", "lastName": "Lovelace", "visitDate": date });
        post("/appts", body.to_string())
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_201_with_appointment() {
        let response = app().oneshot(book("2024-12-27")).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: Value = json_body(response).await;
        assert_eq!(
            body,
            json!({ "id": 1, "firstName": "Ada", "lastName": "Lovelace", "visitDate": "2024-12-27" })
        );
    }

    #[tokio::test]
    async fn test_trailing_slash_is_accepted() {
        let body = json!({ "firstName": "Ada", "lastName": "Lovelace", "visitDate": "2024-12-27" });
        let response = app().oneshot(post("/appts/", body.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_business_rejections_map_to_client_errors() {
        let app = app();

        let past = app.clone().oneshot(book("2024-11-30")).await.unwrap();
        assert_eq!(past.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = json_body(past).await;
        assert_eq!(body.error, PAST_DAY_MESSAGE);
        assert_eq!(body.code, 400);

        let holiday = app.clone().oneshot(book("2024-12-25")).await.unwrap();
        assert_eq!(holiday.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = json_body(holiday).await;
        assert_eq!(body.error, HOLIDAY_MESSAGE);

        let first = app.clone().oneshot(book("2024-12-30")).await.unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);
        let second = app.oneshot(book("2024-12-30")).await.unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body: ErrorBody = json_body(second).await;
        assert_eq!(body.error, CONFLICT_MESSAGE);
        assert_eq!(body.status, "Conflict");
    }

    #[tokio::test]
    async fn test_invalid_payloads_are_rejected_before_booking() {
        let app = app();

        let missing = json!({ "firstName": "Ada", "visitDate": "2024-12-27" });
        let response = app.clone().oneshot(post("/appts", missing.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = json_body(response).await;
        assert_eq!(body.error, "lastName is required");

        let too_long = json!({ "firstName": "A".repeat(51), "lastName": "L", "visitDate": "2024-12-27" });
        let response = app.clone().oneshot(post("/appts", too_long.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bad_date = json!({ "firstName": "Ada", "lastName": "L", "visitDate": "27.12.2024" });
        let response = app.clone().oneshot(post("/appts", bad_date.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app.clone().oneshot(post("/appts", "{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // None of the above reached the store
        let response = app.oneshot(book("2024-12-27")).await.unwrap();
        let body: Value = json_body(response).await;
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn test_oracle_failure_is_a_generic_server_error() {
        let response = app_with(ScriptedHolidayOracle::failing())
            .oneshot(book("2024-12-27"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = json_body(response).await;
        assert_eq!(body.error, "internal server error");
    }

    #[tokio::test]
    async fn test_get_reads_committed_appointment() {
        let app = app();

        let free = Request::get("/appts/2024-12-27").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(free).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        app.clone().oneshot(book("2024-12-27")).await.unwrap();

        let taken = Request::get("/appts/2024-12-27").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(taken).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = json_body(response).await;
        assert_eq!(body["firstName"], "Ada");
        assert_eq!(body["visitDate"], "2024-12-27");

        let invalid = Request::get("/appts/tomorrow").body(Body::empty()).unwrap();
        let response = app.oneshot(invalid).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
