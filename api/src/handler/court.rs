use crate::model::{
    court::{CourtResponse, CourtsResponse, CreateCourtRequest},
    reservation::{BookedSlotResponse, BookedSlotsQuery},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::CourtId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_court(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateCourtRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .court_repository()
        .create(req.into())
        .await
        .map(|_| StatusCode::CREATED)
}

pub async fn show_court_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CourtsResponse>> {
    registry
        .court_repository()
        .find_all()
        .await
        .map(CourtsResponse::from)
        .map(Json)
}

pub async fn show_court(
    Path(court_id): Path<CourtId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CourtResponse>> {
    registry
        .court_repository()
        .find_by_id(court_id)
        .await
        .and_then(|court| match court {
            Some(court) => Ok(Json(court.into())),
            None => Err(AppError::EntityNotFound("not found".into())),
        })
}

// 指定日のコートの予約済み時間帯を返す
pub async fn show_booked_slots(
    Path(court_id): Path<CourtId>,
    Query(query): Query<BookedSlotsQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<BookedSlotResponse>>> {
    registry
        .reservation_repository()
        .find_booked_slots(court_id, query.date)
        .await
        .map(|slots| {
            Json(
                slots
                    .into_iter()
                    .map(BookedSlotResponse::from)
                    .collect::<Vec<_>>(),
            )
        })
}

#[cfg(test)]
mod tests {
    use crate::route::v1;
    use crate::testing::{send, test_registry, InMemoryStore};
    use axum::http::StatusCode;
    use axum::Router;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn app(store: &Arc<Mutex<InMemoryStore>>) -> Router {
        v1::routes().with_state(test_registry(store.clone()))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn booked_slots_lists_committed_intervals_in_order() {
        let store = Arc::new(Mutex::new(
            InMemoryStore::new(today()).with_court("COURT-A", true),
        ));
        let app = app(&store);

        for (start_time, end_time) in [("13:00:00", "14:00:00"), ("10:00:00", "11:00:00")] {
            let (status, _) = send(
                &app,
                "POST",
                "/api/v1/reservations/court",
                Some(json!({
                    "resourceId": "COURT-A",
                    "requesterId": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
                    "date": "2025-02-01",
                    "startTime": start_time,
                    "endTime": end_time,
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(
            &app,
            "GET",
            "/api/v1/resources/court/COURT-A/booked?date=2025-02-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "startTime": "10:00:00", "endTime": "11:00:00" },
                { "startTime": "13:00:00", "endTime": "14:00:00" },
            ])
        );

        // 別の日には予約は無い
        let (status, body) = send(
            &app,
            "GET",
            "/api/v1/resources/court/COURT-A/booked?date=2025-02-02",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn booked_slots_for_unknown_court_is_not_found() {
        let store = Arc::new(Mutex::new(InMemoryStore::new(today())));
        let app = app(&store);

        let (status, body) = send(
            &app,
            "GET",
            "/api/v1/resources/court/COURT-X/booked?date=2025-02-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn court_registration_and_lookup() {
        let store = Arc::new(Mutex::new(InMemoryStore::new(today())));
        let app = app(&store);

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/resources/court",
            Some(json!({ "courtId": "COURT-A", "courtName": "第1コート" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        // 同じ ID での再登録は競合になる
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/resources/court",
            Some(json!({ "courtId": "COURT-A", "courtName": "第1コート" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "conflict");

        let (status, body) = send(&app, "GET", "/api/v1/resources/court/COURT-A", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["courtId"], "COURT-A");

        let (status, _) = send(&app, "GET", "/api/v1/resources/court/COURT-B", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
