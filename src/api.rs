//! REST client for the booking API, used by the desk binary. Never talks
//! to the database directly.

use crate::db::models::{AppointmentDetail, ServiceWithSubs};
use crate::error::{ApiErrorResponse, LacquerError};
use crate::types::{AvailabilityResponse, BookingRequest, BookingResponse};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

pub struct SalonApi {
    base_url: String,
    client: reqwest::Client,
}

impl SalonApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn services(&self) -> Result<Vec<ServiceWithSubs>, LacquerError> {
        let url = format!("{}/api/services", self.base_url);
        let resp = self.client.get(url).send().await?;
        Self::decode(resp).await
    }

    pub async fn appointments_for_week(
        &self,
        start: NaiveDate,
    ) -> Result<Vec<AppointmentDetail>, LacquerError> {
        let url = format!("{}/api/appointments/week/{start}", self.base_url);
        let resp = self.client.get(url).send().await?;
        Self::decode(resp).await
    }

    pub async fn check_slot(&self, date: NaiveDate, time: &str) -> Result<bool, LacquerError> {
        let url = format!("{}/api/appointments/check", self.base_url);
        let resp = self
            .client
            .get(url)
            .query(&[("date", date.to_string()), ("time", time.to_string())])
            .send()
            .await?;
        let availability: AvailabilityResponse = Self::decode(resp).await?;
        Ok(availability.available)
    }

    pub async fn book(&self, request: &BookingRequest) -> Result<BookingResponse, LacquerError> {
        let url = format!("{}/api/appointments", self.base_url);
        let resp = self.client.post(url).json(request).send().await?;
        Self::decode(resp).await
    }

    pub async fn cancel(&self, id: i64) -> Result<AppointmentDetail, LacquerError> {
        let url = format!("{}/api/appointments/{id}/cancel", self.base_url);
        let resp = self.client.patch(url).send().await?;
        Self::decode(resp).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), LacquerError> {
        let url = format!("{}/api/appointments/{id}", self.base_url);
        let resp = self.client.delete(url).send().await?;
        if resp.status().is_success() {
            return Ok(());
        }
        Err(Self::decode_error(resp).await)
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, LacquerError> {
        if resp.status().is_success() {
            return Ok(resp.json::<T>().await?);
        }
        Err(Self::decode_error(resp).await)
    }

    /// Turn a non-2xx response into the server's error envelope when it
    /// parses, or a generic status-tagged error otherwise.
    async fn decode_error(resp: reqwest::Response) -> LacquerError {
        let status = resp.status();
        match resp.json::<ApiErrorResponse>().await {
            Ok(envelope) => LacquerError::Api {
                code: envelope.error.code,
                message: envelope.error.message,
            },
            Err(_) => LacquerError::Api {
                code: status.as_str().to_string(),
                message: "unexpected response from booking API".to_string(),
            },
        }
    }
}
