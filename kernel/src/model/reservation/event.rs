use crate::model::{
    id::{CourtId, EquipmentId, UserId},
    interval::{DatePeriod, TimeSlot},
};
use chrono::{DateTime, Local, NaiveDate};
use derive_new::new;

#[derive(new, Debug, Clone)]
pub struct CreateCourtReservation {
    pub court_id: CourtId,
    pub reserved_by: UserId,
    pub reserved_on: NaiveDate,
    pub slot: TimeSlot,
    pub reserved_at: DateTime<Local>,
}

#[derive(new, Debug, Clone)]
pub struct CreateEquipmentReservation {
    pub equipment_id: EquipmentId,
    pub reserved_by: UserId,
    pub period: DatePeriod,
    pub quantity: i32,
    pub reserved_at: DateTime<Local>,
}
