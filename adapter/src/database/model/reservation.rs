use chrono::{NaiveDate, NaiveTime};
use kernel::model::interval::{DatePeriod, TimeSlot};
use sqlx::FromRow;

// コートの予約済み時間帯を取得する際に使う型
#[derive(FromRow)]
pub struct BookedSlotRow {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<BookedSlotRow> for TimeSlot {
    fn from(value: BookedSlotRow) -> Self {
        let BookedSlotRow {
            start_time,
            end_time,
        } = value;
        TimeSlot {
            start_time,
            end_time,
        }
    }
}

// 機材の消費数量を集計する際に使う型
#[derive(FromRow)]
pub struct EquipmentLoadRow {
    pub start_date: NaiveDate,
    pub return_date: NaiveDate,
    pub quantity: i32,
}

impl EquipmentLoadRow {
    pub fn into_period_quantity(self) -> (DatePeriod, i32) {
        let EquipmentLoadRow {
            start_date,
            return_date,
            quantity,
        } = self;
        (DatePeriod::new(start_date, return_date), quantity)
    }
}
