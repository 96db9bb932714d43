use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum LacquerError {
    #[error("database error: {0}")]
    Database(#[from] SqlxError),

    #[error("slot {date} {time} is already booked")]
    SlotTaken { date: NaiveDate, time: String },

    #[error("appointment {0} not found")]
    AppointmentNotFound(i64),

    #[error("{0} must not be empty")]
    MissingField(&'static str),

    #[error("unknown service or sub-service reference")]
    InvalidReference,

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("API error {code}: {message}")]
    Api { code: String, message: String },
}

impl IntoResponse for LacquerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            LacquerError::SlotTaken { .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "SLOT_TAKEN".to_string(),
                    message: "This time slot is already booked.".to_string(),
                },
            ),
            LacquerError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "MISSING_FIELD".to_string(),
                    message: format!("{field} must not be empty."),
                },
            ),
            LacquerError::InvalidReference => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "INVALID_REFERENCE".to_string(),
                    message: "Unknown service or sub-service.".to_string(),
                },
            ),
            LacquerError::AppointmentNotFound(_) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: "Appointment not found.".to_string(),
                },
            ),
            LacquerError::Database(_) | LacquerError::Api { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                },
            ),
            LacquerError::Reqwest(_) => (
                StatusCode::BAD_GATEWAY,
                ApiErrorBody {
                    code: "BAD_GATEWAY".to_string(),
                    message: "Upstream service is unavailable.".to_string(),
                },
            ),
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
