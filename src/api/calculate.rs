use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use crate::{
    api::{error::ApiError, response::ApiResponse},
    calculator::{
        validate_input, BatteryStrategy, BatteryStrategyParams, BatteryStrategyProjection,
        StandardProjection,
    },
    domain::{CalculationInput, PeakPeriod, TariffStructure},
    state::AppState,
};

/// Request for a quote against a catalog tariff
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TariffCalculationRequest {
    pub tariff_id: i32,
    #[serde(flatten)]
    pub input: CalculationInput,
}

/// Request for a quote with a battery dispatch strategy
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BatteryCalculationRequest {
    pub tariff_id: i32,
    #[serde(default = "default_strategy")]
    pub battery_strategy: String,
    /// kWh
    #[serde(default)]
    #[validate(range(exclusive_min = 0.0))]
    pub battery_capacity: f64,
    #[serde(default = "default_efficiency")]
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub battery_efficiency: f64,
    #[serde(flatten)]
    pub input: CalculationInput,
}

fn default_strategy() -> String {
    BatteryStrategy::default().to_string()
}

fn default_efficiency() -> f64 {
    crate::calculator::battery::DEFAULT_BATTERY_EFFICIENCY
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TariffQuote {
    #[serde(flatten)]
    pub projection: StandardProjection,
    pub tariff_details: TariffStructure,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryQuote {
    #[serde(flatten)]
    pub projection: BatteryStrategyProjection,
    pub tariff_details: TariffStructure,
}

fn ensure_valid(input: &CalculationInput) -> Result<(), ApiError> {
    let errors = validate_input(input);
    if errors.is_empty() {
        Ok(())
    } else {
        tracing::info!(count = errors.len(), "rejected calculation input");
        Err(ApiError::InvalidInput(errors))
    }
}

async fn active_tariff(state: &AppState, id: i32) -> Result<TariffStructure, ApiError> {
    state
        .repos
        .catalog
        .find_tariff(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Tariff {} not found", id)))
}

/// POST /api/calculate/with-tariff - Sizing, financial and environmental quote
pub async fn with_tariff(
    State(state): State<AppState>,
    Json(request): Json<TariffCalculationRequest>,
) -> Result<Json<ApiResponse<TariffQuote>>, ApiError> {
    let started = Instant::now();
    ensure_valid(&request.input)?;

    let tariff = active_tariff(&state, request.tariff_id).await?;
    let projection = state
        .calculator
        .standard_projection(&request.input, &tariff.tariff())?;

    tracing::info!(
        tariff_id = tariff.id,
        panels = projection.system_requirements.panels_required,
        payback_years = ?projection.financials.payback_period,
        "tariff calculation complete"
    );

    let quote = TariffQuote {
        projection,
        tariff_details: tariff,
    };
    Ok(Json(
        ApiResponse::success(quote).with_duration(started.elapsed().as_millis() as u64),
    ))
}

/// POST /api/calculate/with-battery-strategy - Quote including battery dispatch
pub async fn with_battery_strategy(
    State(state): State<AppState>,
    Json(request): Json<BatteryCalculationRequest>,
) -> Result<Json<ApiResponse<BatteryQuote>>, ApiError> {
    let started = Instant::now();
    ensure_valid(&request.input)?;
    request.validate()?;

    let strategy = BatteryStrategy::parse(&request.battery_strategy)?;
    let tariff = active_tariff(&state, request.tariff_id).await?;

    let peak_periods: Vec<PeakPeriod> = state
        .repos
        .catalog
        .peak_periods(tariff.tariff_type_id)
        .await?
        .iter()
        .map(PeakPeriod::from)
        .collect();

    let params = BatteryStrategyParams::new(request.battery_capacity, strategy, peak_periods)
        .with_efficiency(request.battery_efficiency);
    let projection = state
        .calculator
        .battery_strategy_projection(&request.input, &tariff.tariff(), &params)?;

    tracing::info!(
        tariff_id = tariff.id,
        strategy = %strategy,
        peak_periods = params.peak_periods.len(),
        daily_savings = projection.battery_usage.daily_savings,
        "battery strategy calculation complete"
    );

    let quote = BatteryQuote {
        projection,
        tariff_details: tariff,
    };
    Ok(Json(
        ApiResponse::success(quote).with_duration(started.elapsed().as_millis() as u64),
    ))
}
