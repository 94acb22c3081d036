use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CalculationInput, SystemRequirements};

/// Calendar year used to count days per month
const REFERENCE_YEAR: i32 = 2024;

/// Energy balance for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBalance {
    pub month: u32,
    pub days: u32,
    /// kWh
    pub production: f64,
    pub consumption: f64,
    pub grid_usage: f64,
    pub self_consumption: f64,
    pub exported_energy: f64,
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 30,
    }
}

/// Month-by-month production against consumption for the sized array.
pub fn monthly_breakdown(
    input: &CalculationInput,
    requirements: &SystemRequirements,
) -> Vec<MonthlyBalance> {
    let daily_production = requirements.solar_requirement * input.peak_sun_hours;
    let daily_consumption = input.annual_energy_consumption / 365.0;

    (1..=12)
        .map(|month| {
            let days = days_in_month(REFERENCE_YEAR, month);
            let production = daily_production * f64::from(days);
            let consumption = daily_consumption * f64::from(days);
            MonthlyBalance {
                month,
                days,
                production,
                consumption,
                grid_usage: (consumption - production).max(0.0),
                self_consumption: production.min(consumption),
                exported_energy: (production - consumption).max(0.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::sizing::estimate_requirements;

    #[test]
    fn test_calendar() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn test_sized_array_balances_consumption() {
        let input = CalculationInput::new(7300.0, 50000.0);
        let months = monthly_breakdown(&input, &estimate_requirements(&input));

        assert_eq!(months.len(), 12);
        assert_eq!(months.iter().map(|m| m.days).sum::<u32>(), 366);

        let feb = &months[1];
        assert_eq!(feb.month, 2);
        assert!((feb.consumption - 580.0).abs() < 1e-9);
        assert!((feb.production - 580.0).abs() < 1e-9);
        assert!(feb.grid_usage.abs() < 1e-9);
        assert!(feb.exported_energy.abs() < 1e-9);
    }

    #[test]
    fn test_high_irradiance_exports() {
        let base = CalculationInput::new(7300.0, 50000.0);
        let reqs = estimate_requirements(&base);
        // array sized for 5 sun hours running under 6
        let sunnier = CalculationInput { peak_sun_hours: 6.0, ..base };
        let months = monthly_breakdown(&sunnier, &reqs);

        let jan = &months[0];
        assert!((jan.production - 4.0 * 6.0 * 31.0).abs() < 1e-9);
        assert!((jan.exported_energy - (744.0 - 620.0)).abs() < 1e-9);
        assert!((jan.self_consumption - 620.0).abs() < 1e-9);
        assert_eq!(jan.grid_usage, 0.0);
    }
}
