use serde::{Deserialize, Serialize};
use uuid::Uuid;

// リソース ID は外部から与えられる文字列 ID であるため、
// それぞれ String のニュータイプとして定義する
macro_rules! define_string_id {
    ($id_type:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $id_type(String);

        impl $id_type {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn raw(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $id_type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $id_type {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_string_id!(CourtId);
define_string_id!(EquipmentId);
define_string_id!(ReservationId);

// 予約者 ID。エンジンからは中身を解釈しない不透明な値として扱う
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn raw(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
