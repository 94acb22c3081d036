use serde::{Deserialize, Serialize};

/// Default share of consumption that falls in daylight hours.
pub const DEFAULT_DAYTIME_USAGE_PERCENT: f64 = 50.0;
/// Default equivalent full-irradiance hours per day.
pub const DEFAULT_PEAK_SUN_HOURS: f64 = 5.0;
/// Default panel rating in watts.
pub const DEFAULT_PANEL_WATTAGE: f64 = 610.0;
/// Default grid emissions intensity in kg CO2 per kWh.
pub const DEFAULT_CARBON_INTENSITY: f64 = 0.97;
/// Default yearly grid decarbonization in percent.
pub const DEFAULT_ANNUAL_REDUCTION_RATE: f64 = 1.0;

/// A household's consumption profile and financing terms for one quote.
///
/// Required quantities deserialize to `0.0` when absent so that the
/// validator reports them as human-readable errors instead of the request
/// being rejected as malformed JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// Annual energy consumption in kWh
    #[serde(default)]
    pub annual_energy_consumption: f64,
    /// Share of consumption during daylight (0-100)
    #[serde(default = "default_daytime_usage", rename = "dayTimeUsagePercentage")]
    pub daytime_usage_percentage: f64,
    #[serde(default = "default_peak_sun_hours")]
    pub peak_sun_hours: f64,
    /// Panel rating in W
    #[serde(default = "default_panel_wattage")]
    pub panel_wattage: f64,
    #[serde(default)]
    pub system_cost: f64,
    #[serde(default)]
    pub deposit: f64,
    /// Annual interest in percent
    #[serde(default)]
    pub loan_interest_rate: f64,
    /// Loan term in years
    #[serde(default)]
    pub loan_term: f64,
    /// kg CO2 per kWh
    #[serde(default = "default_carbon_intensity")]
    pub carbon_intensity: f64,
    /// Yearly grid decarbonization in percent
    #[serde(default = "default_annual_reduction_rate")]
    pub annual_reduction_rate: f64,
}

fn default_daytime_usage() -> f64 {
    DEFAULT_DAYTIME_USAGE_PERCENT
}

fn default_peak_sun_hours() -> f64 {
    DEFAULT_PEAK_SUN_HOURS
}

fn default_panel_wattage() -> f64 {
    DEFAULT_PANEL_WATTAGE
}

fn default_carbon_intensity() -> f64 {
    DEFAULT_CARBON_INTENSITY
}

fn default_annual_reduction_rate() -> f64 {
    DEFAULT_ANNUAL_REDUCTION_RATE
}

impl CalculationInput {
    /// Input with the given consumption and cost and every optional field at its default.
    pub fn new(annual_energy_consumption: f64, system_cost: f64) -> Self {
        Self {
            annual_energy_consumption,
            daytime_usage_percentage: DEFAULT_DAYTIME_USAGE_PERCENT,
            peak_sun_hours: DEFAULT_PEAK_SUN_HOURS,
            panel_wattage: DEFAULT_PANEL_WATTAGE,
            system_cost,
            deposit: 0.0,
            loan_interest_rate: 0.0,
            loan_term: 0.0,
            carbon_intensity: DEFAULT_CARBON_INTENSITY,
            annual_reduction_rate: DEFAULT_ANNUAL_REDUCTION_RATE,
        }
    }

    pub fn with_daytime_usage(mut self, percent: f64) -> Self {
        self.daytime_usage_percentage = percent;
        self
    }

    pub fn with_loan(mut self, deposit: f64, interest_rate: f64, term_years: f64) -> Self {
        self.deposit = deposit;
        self.loan_interest_rate = interest_rate;
        self.loan_term = term_years;
        self
    }

    pub fn with_emissions(mut self, carbon_intensity: f64, annual_reduction_rate: f64) -> Self {
        self.carbon_intensity = carbon_intensity;
        self.annual_reduction_rate = annual_reduction_rate;
        self
    }

    /// Amount financed after the deposit
    pub fn loan_amount(&self) -> f64 {
        self.system_cost - self.deposit
    }
}

/// Sizing derived from a [`CalculationInput`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemRequirements {
    /// kWh per day
    pub daily_consumption: f64,
    pub daytime_usage: f64,
    pub nighttime_usage: f64,
    /// Required array size in kW
    pub solar_requirement: f64,
    /// Required storage in kWh
    pub battery_requirement: f64,
    pub panels_required: u32,
}

impl SystemRequirements {
    /// Consumption over a 365-day year
    pub fn annual_consumption(&self) -> f64 {
        self.daily_consumption * 365.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_on_deserialize() {
        let input: CalculationInput = serde_json::from_str(
            r#"{"annualEnergyConsumption": 12000, "systemCost": 150000}"#,
        )
        .unwrap();

        assert_eq!(input.daytime_usage_percentage, 50.0);
        assert_eq!(input.peak_sun_hours, 5.0);
        assert_eq!(input.panel_wattage, 610.0);
        assert_eq!(input.deposit, 0.0);
        assert_eq!(input.carbon_intensity, 0.97);
        assert_eq!(input.annual_reduction_rate, 1.0);
        assert_eq!(input, CalculationInput::new(12000.0, 150000.0));
    }

    #[test]
    fn test_missing_required_fields_become_zero() {
        let input: CalculationInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input.annual_energy_consumption, 0.0);
        assert_eq!(input.system_cost, 0.0);
    }

    #[test]
    fn test_loan_amount() {
        let input = CalculationInput::new(10000.0, 120000.0).with_loan(20000.0, 10.0, 5.0);
        assert_eq!(input.loan_amount(), 100000.0);
    }
}
