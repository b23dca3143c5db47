use chrono::{NaiveDate, NaiveTime};
use garde::Validate;
use kernel::model::{
    id::{CourtId, EquipmentId, ReservationId, UserId},
    interval::{DatePeriod, TimeSlot},
    reservation::{
        event::{CreateCourtReservation, CreateEquipmentReservation},
        EquipmentAvailability,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourtReservationRequest {
    #[garde(length(min = 1))]
    pub resource_id: String,
    #[garde(skip)]
    pub requester_id: UserId,
    #[garde(skip)]
    pub date: NaiveDate,
    #[garde(skip)]
    pub start_time: NaiveTime,
    #[garde(skip)]
    pub end_time: NaiveTime,
}

impl From<CreateCourtReservationRequest> for CreateCourtReservation {
    fn from(value: CreateCourtReservationRequest) -> Self {
        let CreateCourtReservationRequest {
            resource_id,
            requester_id,
            date,
            start_time,
            end_time,
        } = value;
        CreateCourtReservation::new(
            CourtId::new(resource_id),
            requester_id,
            date,
            TimeSlot::new(start_time, end_time),
            chrono::Local::now(),
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentReservationRequest {
    #[garde(length(min = 1))]
    pub resource_id: String,
    #[garde(skip)]
    pub requester_id: UserId,
    #[garde(skip)]
    pub start_date: NaiveDate,
    #[garde(skip)]
    pub end_date: NaiveDate,
    // 要求数量は 1 以上
    #[garde(range(min = 1))]
    pub quantity: i32,
}

impl From<CreateEquipmentReservationRequest> for CreateEquipmentReservation {
    fn from(value: CreateEquipmentReservationRequest) -> Self {
        let CreateEquipmentReservationRequest {
            resource_id,
            requester_id,
            start_date,
            end_date,
            quantity,
        } = value;
        CreateEquipmentReservation::new(
            EquipmentId::new(resource_id),
            requester_id,
            DatePeriod::new(start_date, end_date),
            quantity,
            chrono::Local::now(),
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreatedResponse {
    pub reservation_id: ReservationId,
}

#[derive(Debug, Deserialize)]
pub struct BookedSlotsQuery {
    pub date: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedSlotResponse {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<TimeSlot> for BookedSlotResponse {
    fn from(value: TimeSlot) -> Self {
        let TimeSlot {
            start_time,
            end_time,
        } = value;
        Self {
            start_time,
            end_time,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentAvailabilityResponse {
    pub total_capacity: i32,
    pub available_quantity: i32,
}

impl From<EquipmentAvailability> for EquipmentAvailabilityResponse {
    fn from(value: EquipmentAvailability) -> Self {
        let EquipmentAvailability {
            total_quantity,
            available_quantity,
        } = value;
        Self {
            total_capacity: total_quantity,
            available_quantity,
        }
    }
}
