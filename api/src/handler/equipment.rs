use crate::model::{
    equipment::{CreateEquipmentRequest, EquipmentListResponse, EquipmentResponse},
    reservation::{AvailabilityQuery, EquipmentAvailabilityResponse},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::EquipmentId, interval::DatePeriod};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_equipment(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEquipmentRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .equipment_repository()
        .create(req.into())
        .await
        .map(|_| StatusCode::CREATED)
}

pub async fn show_equipment_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EquipmentListResponse>> {
    registry
        .equipment_repository()
        .find_all()
        .await
        .map(EquipmentListResponse::from)
        .map(Json)
}

pub async fn show_equipment(
    Path(equipment_id): Path<EquipmentId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EquipmentResponse>> {
    registry
        .equipment_repository()
        .find_by_id(equipment_id)
        .await
        .and_then(|equipment| match equipment {
            Some(equipment) => Ok(Json(equipment.into())),
            None => Err(AppError::EntityNotFound("not found".into())),
        })
}

// 指定期間の機材の空き状況を返す
pub async fn show_equipment_availability(
    Path(equipment_id): Path<EquipmentId>,
    Query(query): Query<AvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EquipmentAvailabilityResponse>> {
    if query.end < query.start {
        return Err(AppError::UnprocessableEntity(
            "照会期間の終了日は開始日以降である必要があります。".into(),
        ));
    }

    registry
        .reservation_repository()
        .find_equipment_availability(equipment_id, DatePeriod::new(query.start, query.end))
        .await
        .map(EquipmentAvailabilityResponse::from)
        .map(Json)
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
    async fn availability_reports_total_and_free_quantity() {
        let store = Arc::new(Mutex::new(
            InMemoryStore::new(today()).with_equipment("RACKET-SET", true, 5),
        ));
        let app = app(&store);

        let (status, body) = send(
            &app,
            "GET",
            "/api/v1/resources/equipment/RACKET-SET/availability?start=2025-01-10&end=2025-01-12",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "totalCapacity": 5, "availableQuantity": 5 }));
    }

    #[tokio::test]
    async fn availability_with_inverted_period_is_bad_request() {
        let store = Arc::new(Mutex::new(
            InMemoryStore::new(today()).with_equipment("RACKET-SET", true, 5),
        ));
        let app = app(&store);

        let (status, body) = send(
            &app,
            "GET",
            "/api/v1/resources/equipment/RACKET-SET/availability?start=2025-01-12&end=2025-01-10",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_input");
    }

    #[tokio::test]
    async fn availability_for_unknown_equipment_is_not_found() {
        let store = Arc::new(Mutex::new(InMemoryStore::new(today())));
        let app = app(&store);

        let (status, _) = send(
            &app,
            "GET",
            "/api/v1/resources/equipment/NOPE/availability?start=2025-01-10&end=2025-01-12",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn equipment_registration_validates_quantity() {
        let store = Arc::new(Mutex::new(InMemoryStore::new(today())));
        let app = app(&store);

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/resources/equipment",
            Some(json!({
                "equipmentId": "RACKET-SET",
                "equipmentName": "ラケットセット",
                "totalQuantity": 5,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        // 総数量 0 の機材は登録できない
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/resources/equipment",
            Some(json!({
                "equipmentId": "BALL-CART",
                "equipmentName": "ボールカート",
                "totalQuantity": 0,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_input");
    }
}
