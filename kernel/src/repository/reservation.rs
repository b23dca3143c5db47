use crate::model::{
    id::{CourtId, EquipmentId, ReservationId},
    interval::{DatePeriod, TimeSlot},
    reservation::{
        event::{CreateCourtReservation, CreateEquipmentReservation},
        EquipmentAvailability, ReservationClass,
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // コート予約を行う。検証・採番・書き込みはひとつのトランザクションで実行する
    async fn create_court_reservation(
        &self,
        event: CreateCourtReservation,
    ) -> AppResult<ReservationId>;
    // 機材予約を行う
    async fn create_equipment_reservation(
        &self,
        event: CreateEquipmentReservation,
    ) -> AppResult<ReservationId>;
    // 指定日のコートの予約済み時間帯を取得する
    async fn find_booked_slots(
        &self,
        court_id: CourtId,
        date: NaiveDate,
    ) -> AppResult<Vec<TimeSlot>>;
    // 指定期間の機材の空き状況を取得する
    async fn find_equipment_availability(
        &self,
        equipment_id: EquipmentId,
        period: DatePeriod,
    ) -> AppResult<EquipmentAvailability>;
    // 予約を取り消す（レコードは物理削除する）
    async fn cancel(
        &self,
        class: ReservationClass,
        reservation_id: ReservationId,
    ) -> AppResult<()>;
}
