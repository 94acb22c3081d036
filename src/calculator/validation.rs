use super::battery::BatteryStrategyParams;
use crate::domain::CalculationInput;

/// Check a calculation request and list every violated constraint.
///
/// All checks run; an empty list means the input is valid.
pub fn validate_input(input: &CalculationInput) -> Vec<String> {
    let mut errors = Vec::new();

    if !(input.annual_energy_consumption > 0.0) {
        errors.push("Annual energy consumption must be positive".to_string());
    }
    if !(0.0..=100.0).contains(&input.daytime_usage_percentage) {
        errors.push("Day time usage must be between 0 and 100".to_string());
    }
    if !(input.system_cost > 0.0) {
        errors.push("System cost must be positive".to_string());
    }
    if input.loan_interest_rate < 0.0 {
        errors.push("Loan interest rate cannot be negative".to_string());
    }
    if input.loan_term < 0.0 {
        errors.push("Loan term cannot be negative".to_string());
    }
    if input.deposit < 0.0 {
        errors.push("Deposit cannot be negative".to_string());
    } else if input.system_cost > 0.0 && input.deposit > input.system_cost {
        errors.push("Deposit cannot exceed system cost".to_string());
    }
    // sizing divides by both
    if !(input.peak_sun_hours > 0.0) {
        errors.push("Peak sun hours must be positive".to_string());
    }
    if !(input.panel_wattage > 0.0) {
        errors.push("Panel wattage must be positive".to_string());
    }
    if !(input.carbon_intensity >= 0.0) {
        errors.push("Carbon intensity cannot be negative".to_string());
    }
    if !(0.0..=100.0).contains(&input.annual_reduction_rate) {
        errors.push("Annual reduction rate must be between 0 and 100".to_string());
    }

    errors
}

/// Check battery parameters before any strategy divides by them.
pub fn validate_battery(params: &BatteryStrategyParams) -> Vec<String> {
    let mut errors = Vec::new();

    if !(params.battery_capacity > 0.0) {
        errors.push("Battery capacity must be positive".to_string());
    }
    if !(params.efficiency > 0.0 && params.efficiency <= 1.0) {
        errors.push("Battery efficiency must be greater than 0 and at most 1".to_string());
    }

    errors
}
