use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveTime;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("指定時間帯にすでに予約が存在します。")]
    SlotAlreadyReserved {
        conflicting: Vec<(NaiveTime, NaiveTime)>,
    },
    #[error("空き数量が不足しています（現在の空き数量: {available}）。")]
    InsufficientQuantity { available: i32 },
    #[error("{0}")]
    EntityAlreadyExists(String),
    #[error(transparent)]
    TransactionError(sqlx::Error),
    #[error(transparent)]
    SpecificOperationError(sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnprocessableEntity(_) | AppError::ValidationError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::SlotAlreadyReserved { .. }
            | AppError::InsufficientQuantity { .. }
            | AppError::EntityAlreadyExists(_) => StatusCode::CONFLICT,
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // クライアントが機械的に判別するためのエラーコード
    fn code(&self) -> &'static str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "invalid_input",
            StatusCode::NOT_FOUND => "not_found",
            StatusCode::CONFLICT => "conflict",
            _ => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
        }

        // 競合エラーには呼び出し側が要求を修正できるだけの情報を含める
        let body = match &self {
            AppError::SlotAlreadyReserved { conflicting } => json!({
                "code": self.code(),
                "message": self.to_string(),
                "conflictingIntervals": conflicting
                    .iter()
                    .map(|(start_time, end_time)| json!({
                        "startTime": start_time,
                        "endTime": end_time,
                    }))
                    .collect::<Vec<_>>(),
            }),
            AppError::InsufficientQuantity { available } => json!({
                "code": self.code(),
                "message": self.to_string(),
                "availableQuantity": available,
            }),
            _ => json!({
                "code": self.code(),
                "message": self.to_string(),
            }),
        };

        (status_code, Json(body)).into_response()
    }
}
