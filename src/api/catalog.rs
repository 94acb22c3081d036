use axum::{extract::State, Json};

use crate::{
    api::{error::ApiError, response::ApiResponse},
    domain::{BatteryModule, Inverter, SolarPanel, TariffStructure},
    state::AppState,
};

/// GET /api/components/panels - Active solar panels
pub async fn list_panels(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SolarPanel>>>, ApiError> {
    let panels = state.repos.catalog.list_panels().await?;
    let total = panels.len();
    Ok(Json(ApiResponse::success(panels).with_count(total)))
}

/// GET /api/components/batteries - Active batteries
pub async fn list_batteries(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BatteryModule>>>, ApiError> {
    let batteries = state.repos.catalog.list_batteries().await?;
    let total = batteries.len();
    Ok(Json(ApiResponse::success(batteries).with_count(total)))
}

/// GET /api/components/inverters - Active inverters
pub async fn list_inverters(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Inverter>>>, ApiError> {
    let inverters = state.repos.catalog.list_inverters().await?;
    let total = inverters.len();
    Ok(Json(ApiResponse::success(inverters).with_count(total)))
}

/// GET /api/tariffs - Active tariff structures
pub async fn list_tariffs(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TariffStructure>>>, ApiError> {
    let tariffs = state.repos.catalog.list_tariffs().await?;
    let total = tariffs.len();
    Ok(Json(ApiResponse::success(tariffs).with_count(total)))
}
