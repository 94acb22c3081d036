use crate::domain::Tariff;

/// Approximate hours in a month
pub const HOURS_PER_MONTH: f64 = 730.0;
/// Assumed ratio of peak to average demand. A heuristic, not a measured value.
pub const PEAK_TO_AVERAGE_RATIO: f64 = 2.0;

/// Peak demand in kW implied by a month's consumption
pub fn estimated_peak_demand(consumption_kwh: f64) -> f64 {
    consumption_kwh / HOURS_PER_MONTH * PEAK_TO_AVERAGE_RATIO
}

/// Bill for one billing period of `consumption_kwh` under `tariff`.
pub fn billing_period_cost(consumption_kwh: f64, tariff: &Tariff) -> f64 {
    let mut total = tariff.fixed_charge;
    total += consumption_kwh * tariff.energy_charge;

    if tariff.has_demand_charge() {
        total += tariff.demand_charge * estimated_peak_demand(consumption_kwh);
    }

    total
}
