//! Wire types for the REST API, shared by the server handlers and the desk
//! client.

use crate::db::models::{Appointment, NewAppointment};
use crate::error::LacquerError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Booking form payload for `POST /api/appointments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub client_name: String,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub client_phone: Option<String>,
    pub service_id: i64,
    pub sub_service_id: i64,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingRequest {
    /// Validate required fields and normalize blank optionals to `None`.
    pub fn into_new_appointment(self) -> Result<NewAppointment, LacquerError> {
        let client_name = self.client_name.trim().to_string();
        if client_name.is_empty() {
            return Err(LacquerError::MissingField("clientName"));
        }
        let time = self.time.trim().to_string();
        if time.is_empty() {
            return Err(LacquerError::MissingField("time"));
        }

        Ok(NewAppointment {
            client_name,
            client_email: normalize(self.client_email),
            client_phone: normalize(self.client_phone),
            service_id: self.service_id,
            sub_service_id: self.sub_service_id,
            date: self.date,
            time,
            notes: normalize(self.notes),
        })
    }
}

fn normalize(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub message: String,
    pub appointment: Appointment,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckQuery {
    pub date: NaiveDate,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BookingRequest {
        BookingRequest {
            client_name: "Ana Torres".to_string(),
            client_email: Some("ana@example.com".to_string()),
            client_phone: Some("555-0101".to_string()),
            service_id: 1,
            sub_service_id: 2,
            date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            time: "10:00".to_string(),
            notes: None,
        }
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut req = request();
        req.client_name = "   ".to_string();
        assert!(matches!(
            req.into_new_appointment(),
            Err(LacquerError::MissingField("clientName"))
        ));
    }

    #[test]
    fn blank_time_is_rejected() {
        let mut req = request();
        req.time = String::new();
        assert!(matches!(
            req.into_new_appointment(),
            Err(LacquerError::MissingField("time"))
        ));
    }

    #[test]
    fn blank_optionals_normalize_to_none() {
        let mut req = request();
        req.client_email = Some("  ".to_string());
        req.client_phone = None;
        let new = req.into_new_appointment().unwrap();
        assert_eq!(new.client_email, None);
        assert_eq!(new.client_phone, None);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let mut req = request();
        req.client_name = " Ana Torres ".to_string();
        req.client_email = Some(" ana@example.com ".to_string());
        let new = req.into_new_appointment().unwrap();
        assert_eq!(new.client_name, "Ana Torres");
        assert_eq!(new.client_email.as_deref(), Some("ana@example.com"));
    }
}
