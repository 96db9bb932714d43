use crate::db::models::AppointmentDetail;
use crate::types::{AvailabilityResponse, BookingRequest, BookingResponse, CheckQuery, MessageResponse};
use crate::{LacquerError, router::LacquerState};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use tracing::{info, warn};

/// GET /api/appointments -> every appointment, newest first.
pub async fn list_all(
    State(state): State<LacquerState>,
) -> Result<Json<Vec<AppointmentDetail>>, LacquerError> {
    let appointments = state.storage.appointments_all().await?;
    Ok(Json(appointments))
}

/// GET /api/appointments/day/{date} -> one day, ordered by time.
pub async fn list_day(
    State(state): State<LacquerState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Vec<AppointmentDetail>>, LacquerError> {
    let appointments = state.storage.appointments_for_day(date).await?;
    Ok(Json(appointments))
}

/// GET /api/appointments/week/{start} -> [start, start+6], ordered by date and time.
pub async fn list_week(
    State(state): State<LacquerState>,
    Path(start): Path<NaiveDate>,
) -> Result<Json<Vec<AppointmentDetail>>, LacquerError> {
    let appointments = state.storage.appointments_for_week(start).await?;
    Ok(Json(appointments))
}

/// GET /api/appointments/check?date=&time= -> slot availability probe.
pub async fn check_slot(
    State(state): State<LacquerState>,
    Query(query): Query<CheckQuery>,
) -> Result<Json<AvailabilityResponse>, LacquerError> {
    let taken = state.storage.slot_taken(query.date, &query.time).await?;
    Ok(Json(AvailabilityResponse { available: !taken }))
}

/// POST /api/appointments -> validate, then book within one transaction.
pub async fn create(
    State(state): State<LacquerState>,
    Json(request): Json<BookingRequest>,
) -> Result<impl IntoResponse, LacquerError> {
    let new = request.into_new_appointment()?;

    let appointment = match state.storage.book(&new).await {
        Ok(appointment) => appointment,
        Err(e @ LacquerError::SlotTaken { .. }) => {
            warn!(date = %new.date, time = %new.time, "rejected booking for occupied slot");
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    info!(
        id = appointment.id,
        date = %appointment.date,
        time = %appointment.time,
        "appointment booked"
    );
    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message: "Appointment booked successfully.".to_string(),
            appointment,
        }),
    ))
}

/// PATCH /api/appointments/{id}/cancel -> soft cancel, returns the updated row.
pub async fn cancel(
    State(state): State<LacquerState>,
    Path(id): Path<i64>,
) -> Result<Json<AppointmentDetail>, LacquerError> {
    let appointment = state.storage.cancel(id).await?;
    info!(id, "appointment cancelled");
    Ok(Json(appointment))
}

/// DELETE /api/appointments/{id} -> hard delete, frees the slot.
pub async fn remove(
    State(state): State<LacquerState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, LacquerError> {
    state.storage.delete(id).await?;
    info!(id, "appointment deleted");
    Ok(Json(MessageResponse {
        message: "Appointment deleted successfully.".to_string(),
    }))
}
