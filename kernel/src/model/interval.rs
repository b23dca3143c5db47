use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// コート予約の時間帯。終端は排他的に扱うため、
// 10:00-11:00 と 11:00-12:00 のように接するだけの予約は重複しない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl TimeSlot {
    pub fn new(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.end_time <= self.start_time
    }

    // 重複条件：existing.start < new.end AND new.start < existing.end
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }
}

// 機材貸出の期間。返却日当日まで在庫を消費するため、両端を含む閉区間とする
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DatePeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.end_date < self.start_date
    }

    pub fn intersects(&self, other: &DatePeriod) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}

// 指定期間における機材の空き数量を求める。
// 返却日を過ぎた予約は在庫を消費しない。
// 帳簿が正しければ負にはならないが、念のため 0 でクランプする
pub fn available_quantity(
    total_quantity: i32,
    reservations: &[(DatePeriod, i32)],
    period: &DatePeriod,
    today: NaiveDate,
) -> i32 {
    let consumed: i32 = reservations
        .iter()
        .filter(|(p, _)| p.end_date >= today && p.intersects(period))
        .map(|(_, quantity)| quantity)
        .sum();
    (total_quantity - consumed).max(0)
}
