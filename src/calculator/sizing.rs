use crate::domain::{CalculationInput, SystemRequirements};

/// Hours of night-time load the battery is sized to cover
const BACKUP_HOURS: f64 = 8.0;

/// Size the array and the battery for a consumption profile.
pub fn estimate_requirements(input: &CalculationInput) -> SystemRequirements {
    let daily_consumption = input.annual_energy_consumption / 365.0;
    let daytime_usage = daily_consumption * (input.daytime_usage_percentage / 100.0);
    let nighttime_usage = daily_consumption - daytime_usage;

    let solar_requirement = daily_consumption / input.peak_sun_hours;
    let battery_requirement = nighttime_usage * BACKUP_HOURS / 24.0;
    let panels_required = (solar_requirement / (input.panel_wattage / 1000.0)).ceil() as u32;

    SystemRequirements {
        daily_consumption,
        daytime_usage,
        nighttime_usage,
        solar_requirement,
        battery_requirement,
        panels_required,
    }
}
