// ハンドラの振る舞いをデータベースなしで検証するための
// インメモリリポジトリ実装。検証・採番・書き込みの流れは
// adapter 側の実装と同じ順序で行う
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use kernel::model::{
    court::{event::CreateCourt, Court},
    equipment::{event::CreateEquipment, Equipment},
    id::{CourtId, EquipmentId, ReservationId},
    interval::{available_quantity, DatePeriod, TimeSlot},
    reservation::{
        event::{CreateCourtReservation, CreateEquipmentReservation},
        EquipmentAvailability, ReservationClass,
    },
};
use kernel::repository::{
    court::CourtRepository, equipment::EquipmentRepository, health::HealthCheckRepository,
    reservation::ReservationRepository,
};
use registry::AppRegistry;
use serde_json::Value;
use shared::error::{AppError, AppResult};
use tower::ServiceExt;

pub struct StoredCourtReservation {
    pub reservation_id: ReservationId,
    pub court_id: CourtId,
    pub reserved_on: NaiveDate,
    pub slot: TimeSlot,
}

pub struct StoredEquipmentReservation {
    pub reservation_id: ReservationId,
    pub equipment_id: EquipmentId,
    pub period: DatePeriod,
    pub quantity: i32,
}

pub struct InMemoryStore {
    // court_id -> is_active
    pub courts: HashMap<String, bool>,
    // equipment_id -> (is_active, total_quantity)
    pub equipment: HashMap<String, (bool, i32)>,
    pub court_reservations: Vec<StoredCourtReservation>,
    pub equipment_reservations: Vec<StoredEquipmentReservation>,
    pub sequences: HashMap<&'static str, i64>,
    pub today: NaiveDate,
}

impl InMemoryStore {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            courts: HashMap::new(),
            equipment: HashMap::new(),
            court_reservations: Vec::new(),
            equipment_reservations: Vec::new(),
            sequences: HashMap::new(),
            today,
        }
    }

    pub fn with_court(mut self, court_id: &str, is_active: bool) -> Self {
        self.courts.insert(court_id.into(), is_active);
        self
    }

    pub fn with_equipment(mut self, equipment_id: &str, is_active: bool, total: i32) -> Self {
        self.equipment.insert(equipment_id.into(), (is_active, total));
        self
    }

    fn next_id(&mut self, class: ReservationClass) -> ReservationId {
        let seq = self.sequences.entry(class.sequence_key()).or_insert(0);
        *seq += 1;
        class.format_id(*seq)
    }
}

pub struct TestRepositories(pub Arc<Mutex<InMemoryStore>>);

pub fn test_registry(store: Arc<Mutex<InMemoryStore>>) -> AppRegistry {
    let repos = Arc::new(TestRepositories(store));
    AppRegistry::with_repositories(repos.clone(), repos.clone(), repos.clone(), repos)
}

#[async_trait]
impl HealthCheckRepository for TestRepositories {
    async fn check_db(&self) -> bool {
        true
    }
}

#[async_trait]
impl CourtRepository for TestRepositories {
    async fn create(&self, event: CreateCourt) -> AppResult<()> {
        let mut store = self.0.lock().unwrap();
        if store.courts.contains_key(event.court_id.raw()) {
            return Err(AppError::EntityAlreadyExists(event.court_id.to_string()));
        }
        store.courts.insert(event.court_id.raw().into(), event.is_active);
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Court>> {
        let store = self.0.lock().unwrap();
        Ok(store
            .courts
            .iter()
            .map(|(court_id, is_active)| Court {
                court_id: CourtId::new(court_id.clone()),
                court_name: court_id.clone(),
                description: String::new(),
                image_url: None,
                is_active: *is_active,
            })
            .collect())
    }

    async fn find_by_id(&self, court_id: CourtId) -> AppResult<Option<Court>> {
        let store = self.0.lock().unwrap();
        Ok(store.courts.get(court_id.raw()).map(|is_active| Court {
            court_id: court_id.clone(),
            court_name: court_id.to_string(),
            description: String::new(),
            image_url: None,
            is_active: *is_active,
        }))
    }
}

#[async_trait]
impl EquipmentRepository for TestRepositories {
    async fn create(&self, event: CreateEquipment) -> AppResult<()> {
        let mut store = self.0.lock().unwrap();
        if store.equipment.contains_key(event.equipment_id.raw()) {
            return Err(AppError::EntityAlreadyExists(event.equipment_id.to_string()));
        }
        store.equipment.insert(
            event.equipment_id.raw().into(),
            (event.is_active, event.total_quantity),
        );
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Equipment>> {
        let store = self.0.lock().unwrap();
        Ok(store
            .equipment
            .iter()
            .map(|(equipment_id, (is_active, total_quantity))| Equipment {
                equipment_id: EquipmentId::new(equipment_id.clone()),
                equipment_name: equipment_id.clone(),
                description: String::new(),
                image_url: None,
                total_quantity: *total_quantity,
                is_active: *is_active,
            })
            .collect())
    }

    async fn find_by_id(&self, equipment_id: EquipmentId) -> AppResult<Option<Equipment>> {
        let store = self.0.lock().unwrap();
        Ok(store
            .equipment
            .get(equipment_id.raw())
            .map(|(is_active, total_quantity)| Equipment {
                equipment_id: equipment_id.clone(),
                equipment_name: equipment_id.to_string(),
                description: String::new(),
                image_url: None,
                total_quantity: *total_quantity,
                is_active: *is_active,
            }))
    }
}

#[async_trait]
impl ReservationRepository for TestRepositories {
    async fn create_court_reservation(
        &self,
        event: CreateCourtReservation,
    ) -> AppResult<ReservationId> {
        let mut store = self.0.lock().unwrap();

        let Some(&is_active) = store.courts.get(event.court_id.raw()) else {
            return Err(AppError::EntityNotFound(event.court_id.to_string()));
        };
        if !is_active {
            return Err(AppError::UnprocessableEntity(event.court_id.to_string()));
        }

        let conflicting: Vec<_> = store
            .court_reservations
            .iter()
            .filter(|r| {
                r.court_id == event.court_id
                    && r.reserved_on == event.reserved_on
                    && r.slot.overlaps(&event.slot)
            })
            .map(|r| (r.slot.start_time, r.slot.end_time))
            .collect();
        if !conflicting.is_empty() {
            return Err(AppError::SlotAlreadyReserved { conflicting });
        }

        let reservation_id = store.next_id(ReservationClass::Court);
        store.court_reservations.push(StoredCourtReservation {
            reservation_id: reservation_id.clone(),
            court_id: event.court_id,
            reserved_on: event.reserved_on,
            slot: event.slot,
        });
        Ok(reservation_id)
    }

    async fn create_equipment_reservation(
        &self,
        event: CreateEquipmentReservation,
    ) -> AppResult<ReservationId> {
        let mut store = self.0.lock().unwrap();

        let Some(&(is_active, total_quantity)) = store.equipment.get(event.equipment_id.raw())
        else {
            return Err(AppError::EntityNotFound(event.equipment_id.to_string()));
        };
        if !is_active {
            return Err(AppError::UnprocessableEntity(event.equipment_id.to_string()));
        }

        let loads: Vec<(DatePeriod, i32)> = store
            .equipment_reservations
            .iter()
            .filter(|r| r.equipment_id == event.equipment_id)
            .map(|r| (r.period, r.quantity))
            .collect();
        let available = available_quantity(total_quantity, &loads, &event.period, store.today);
        if event.quantity > available {
            return Err(AppError::InsufficientQuantity { available });
        }

        let reservation_id = store.next_id(ReservationClass::Equipment);
        store.equipment_reservations.push(StoredEquipmentReservation {
            reservation_id: reservation_id.clone(),
            equipment_id: event.equipment_id,
            period: event.period,
            quantity: event.quantity,
        });
        Ok(reservation_id)
    }

    async fn find_booked_slots(
        &self,
        court_id: CourtId,
        date: NaiveDate,
    ) -> AppResult<Vec<TimeSlot>> {
        let store = self.0.lock().unwrap();
        if !store.courts.contains_key(court_id.raw()) {
            return Err(AppError::EntityNotFound(court_id.to_string()));
        }
        let mut slots: Vec<TimeSlot> = store
            .court_reservations
            .iter()
            .filter(|r| r.court_id == court_id && r.reserved_on == date)
            .map(|r| r.slot)
            .collect();
        slots.sort_by_key(|slot| slot.start_time);
        Ok(slots)
    }

    async fn find_equipment_availability(
        &self,
        equipment_id: EquipmentId,
        period: DatePeriod,
    ) -> AppResult<EquipmentAvailability> {
        let store = self.0.lock().unwrap();
        let Some(&(_, total_quantity)) = store.equipment.get(equipment_id.raw()) else {
            return Err(AppError::EntityNotFound(equipment_id.to_string()));
        };
        let loads: Vec<(DatePeriod, i32)> = store
            .equipment_reservations
            .iter()
            .filter(|r| r.equipment_id == equipment_id)
            .map(|r| (r.period, r.quantity))
            .collect();
        let available = available_quantity(total_quantity, &loads, &period, store.today);
        Ok(EquipmentAvailability {
            total_quantity,
            available_quantity: available,
        })
    }

    async fn cancel(
        &self,
        class: ReservationClass,
        reservation_id: ReservationId,
    ) -> AppResult<()> {
        let mut store = self.0.lock().unwrap();
        let removed = match class {
            ReservationClass::Court => {
                let before = store.court_reservations.len();
                store
                    .court_reservations
                    .retain(|r| r.reservation_id != reservation_id);
                before != store.court_reservations.len()
            }
            ReservationClass::Equipment => {
                let before = store.equipment_reservations.len();
                store
                    .equipment_reservations
                    .retain(|r| r.reservation_id != reservation_id);
                before != store.equipment_reservations.len()
            }
        };
        if !removed {
            return Err(AppError::EntityNotFound(reservation_id.to_string()));
        }
        Ok(())
    }
}

// テスト用のリクエスト送信ヘルパー
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
