use crate::model::id::ReservationId;
use serde::Deserialize;

pub mod event;

// 予約クラス。クラスごとに ID の接頭辞と採番系列を持つ
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReservationClass {
    Court,
    Equipment,
}

impl ReservationClass {
    // 採番テーブル上のキー
    pub fn sequence_key(&self) -> &'static str {
        match self {
            Self::Court => "court-booking",
            Self::Equipment => "equipment-booking",
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Court => "BKC",
            Self::Equipment => "BSE",
        }
    }

    // 採番された番号を接頭辞つき 4 桁ゼロ埋めの予約 ID に整形する。
    // 9999 を超えた場合は桁が自然に広がり、採番はそのまま継続する
    pub fn format_id(&self, sequence: i64) -> ReservationId {
        ReservationId::new(format!("{}{:04}", self.prefix(), sequence))
    }
}

// 機材の空き状況
#[derive(Debug, Clone, Copy)]
pub struct EquipmentAvailability {
    pub total_quantity: i32,
    pub available_quantity: i32,
}
