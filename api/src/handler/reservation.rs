use crate::model::reservation::{
    CreateCourtReservationRequest, CreateEquipmentReservationRequest, ReservationCreatedResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::ReservationId, reservation::ReservationClass};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// コート予約を登録する
pub async fn reserve_court(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateCourtReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationCreatedResponse>)> {
    req.validate(&())?;

    // 開始時刻 >= 終了時刻の時間帯は構造エラーとして弾く
    if req.end_time <= req.start_time {
        return Err(AppError::UnprocessableEntity(
            "予約終了時刻は開始時刻より後である必要があります。".into(),
        ));
    }

    registry
        .reservation_repository()
        .create_court_reservation(req.into())
        .await
        .map(|reservation_id| {
            (
                StatusCode::CREATED,
                Json(ReservationCreatedResponse { reservation_id }),
            )
        })
}

// 機材予約を登録する
pub async fn reserve_equipment(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEquipmentReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationCreatedResponse>)> {
    req.validate(&())?;

    // 返却日が貸出開始日より前の期間は構造エラーとして弾く
    if req.end_date < req.start_date {
        return Err(AppError::UnprocessableEntity(
            "返却日は貸出開始日以降である必要があります。".into(),
        ));
    }

    registry
        .reservation_repository()
        .create_equipment_reservation(req.into())
        .await
        .map(|reservation_id| {
            (
                StatusCode::CREATED,
                Json(ReservationCreatedResponse { reservation_id }),
            )
        })
}

// 予約を取り消す
pub async fn cancel_reservation(
    Path((class, reservation_id)): Path<(ReservationClass, ReservationId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .reservation_repository()
        .cancel(class, reservation_id)
        .await
        .map(|_| StatusCode::OK)
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

    const REQUESTER: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn app(store: &Arc<Mutex<InMemoryStore>>) -> Router {
        v1::routes().with_state(test_registry(store.clone()))
    }

    fn court_request(start_time: &str, end_time: &str) -> serde_json::Value {
        json!({
            "resourceId": "COURT-A",
            "requesterId": REQUESTER,
            "date": "2025-02-01",
            "startTime": start_time,
            "endTime": end_time,
        })
    }

    fn equipment_request(start_date: &str, end_date: &str, quantity: i32) -> serde_json::Value {
        json!({
            "resourceId": "RACKET-SET",
            "requesterId": REQUESTER,
            "startDate": start_date,
            "endDate": end_date,
            "quantity": quantity,
        })
    }

    #[tokio::test]
    async fn court_reservation_commits_and_allocates_ordered_ids() {
        let store = Arc::new(Mutex::new(
            InMemoryStore::new(today()).with_court("COURT-A", true),
        ));
        let app = app(&store);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations/court",
            Some(court_request("10:00:00", "11:00:00")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["reservationId"], "BKC0001");

        // 終端が接するだけの時間帯は競合しない
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations/court",
            Some(court_request("11:00:00", "12:00:00")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["reservationId"], "BKC0002");
    }

    #[tokio::test]
    async fn overlapping_court_reservation_is_rejected_with_conflicting_intervals() {
        let store = Arc::new(Mutex::new(
            InMemoryStore::new(today()).with_court("COURT-A", true),
        ));
        let app = app(&store);

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/reservations/court",
            Some(court_request("10:00:00", "11:00:00")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations/court",
            Some(court_request("10:30:00", "11:30:00")),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "conflict");
        assert_eq!(body["conflictingIntervals"][0]["startTime"], "10:00:00");
        assert_eq!(body["conflictingIntervals"][0]["endTime"], "11:00:00");

        // 拒否された要求はレコードも ID も残さない
        assert_eq!(store.lock().unwrap().court_reservations.len(), 1);
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations/court",
            Some(court_request("11:00:00", "12:00:00")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["reservationId"], "BKC0002");
    }

    #[tokio::test]
    async fn equipment_reservation_consumes_quantity() {
        let store = Arc::new(Mutex::new(
            InMemoryStore::new(today()).with_equipment("RACKET-SET", true, 5),
        ));
        let app = app(&store);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations/equipment",
            Some(equipment_request("2025-01-10", "2025-01-12", 5)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["reservationId"], "BSE0001");

        let (status, body) = send(
            &app,
            "GET",
            "/api/v1/resources/equipment/RACKET-SET/availability?start=2025-01-11&end=2025-01-11",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalCapacity"], 5);
        assert_eq!(body["availableQuantity"], 0);

        // 期間が重なる要求は空き数量つきで拒否される
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations/equipment",
            Some(equipment_request("2025-01-11", "2025-01-11", 1)),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "conflict");
        assert_eq!(body["availableQuantity"], 0);

        // 期間が重ならなければ全数を借りられる
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations/equipment",
            Some(equipment_request("2025-01-13", "2025-01-14", 5)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["reservationId"], "BSE0002");
    }

    #[tokio::test]
    async fn inverted_ranges_are_rejected_without_side_effects() {
        let store = Arc::new(Mutex::new(
            InMemoryStore::new(today())
                .with_court("COURT-A", true)
                .with_equipment("RACKET-SET", true, 5),
        ));
        let app = app(&store);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations/court",
            Some(court_request("11:00:00", "10:00:00")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_input");

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations/equipment",
            Some(equipment_request("2025-01-12", "2025-01-10", 1)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_input");

        // 構造エラーで弾かれた要求はリポジトリに到達せず、採番も進まない
        let store = store.lock().unwrap();
        assert!(store.court_reservations.is_empty());
        assert!(store.equipment_reservations.is_empty());
        assert!(store.sequences.is_empty());
    }

    #[tokio::test]
    async fn non_positive_quantity_is_rejected() {
        let store = Arc::new(Mutex::new(
            InMemoryStore::new(today()).with_equipment("RACKET-SET", true, 5),
        ));
        let app = app(&store);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations/equipment",
            Some(equipment_request("2025-01-10", "2025-01-12", 0)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_input");
        assert!(store.lock().unwrap().sequences.is_empty());
    }

    #[tokio::test]
    async fn unknown_resources_are_not_found() {
        let store = Arc::new(Mutex::new(InMemoryStore::new(today())));
        let app = app(&store);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations/court",
            Some(court_request("10:00:00", "11:00:00")),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/reservations/equipment",
            Some(equipment_request("2025-01-10", "2025-01-12", 1)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn inactive_court_rejects_reservations() {
        let store = Arc::new(Mutex::new(
            InMemoryStore::new(today()).with_court("COURT-A", false),
        ));
        let app = app(&store);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations/court",
            Some(court_request("10:00:00", "11:00:00")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_input");
    }

    #[tokio::test]
    async fn cancelled_reservation_ids_are_never_reused() {
        let store = Arc::new(Mutex::new(
            InMemoryStore::new(today()).with_court("COURT-A", true),
        ));
        let app = app(&store);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations/court",
            Some(court_request("10:00:00", "11:00:00")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["reservationId"], "BKC0001");

        let (status, _) = send(&app, "DELETE", "/api/v1/reservations/court/BKC0001", None).await;
        assert_eq!(status, StatusCode::OK);

        // 取り消しで時間帯は解放されるが、ID は再利用されない
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations/court",
            Some(court_request("10:00:00", "11:00:00")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["reservationId"], "BKC0002");

        let (status, _) = send(&app, "DELETE", "/api/v1/reservations/court/BKC0001", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
