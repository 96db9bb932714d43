use crate::db::models::ServiceWithSubs;
use crate::{LacquerError, router::LacquerState};
use axum::{Json, extract::State};

/// GET /api/services -> the full catalog with sub-services nested.
pub async fn list_services(
    State(state): State<LacquerState>,
) -> Result<Json<Vec<ServiceWithSubs>>, LacquerError> {
    let catalog = state.storage.list_services().await?;
    Ok(Json(catalog))
}
