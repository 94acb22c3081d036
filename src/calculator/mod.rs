//! Quote calculation engine
//!
//! Pure functions from a validated [`CalculationInput`] and catalog data to
//! sizing, battery dispatch, financial and environmental projections. Nothing
//! here performs I/O or logs; failures come back as [`CalculationError`].

pub mod battery;
pub mod environmental;
pub mod error;
pub mod financial;
pub mod monthly;
pub mod sizing;
pub mod tariff;
pub mod validation;

pub use battery::{evaluate_strategy, BatteryStrategy, BatteryStrategyParams, BatteryUsage};
pub use environmental::{project_environmental, EnvironmentalImpact, EnvironmentalYear};
pub use error::CalculationError;
pub use financial::{project_financials, FinancialYear, Financials, LoanTerms};
pub use monthly::{monthly_breakdown, MonthlyBalance};
pub use sizing::estimate_requirements;
pub use tariff::billing_period_cost;
pub use validation::{validate_battery, validate_input};

use serde::{Deserialize, Serialize};

use crate::domain::{CalculationInput, SystemRequirements, Tariff};

/// Length of every projection table
pub const PROJECTION_YEARS: u32 = 20;
/// Yearly panel output retained (0.5% loss per year)
pub const PANEL_DEGRADATION: f64 = 0.995;
/// Yearly tariff growth (5% per year)
pub const TARIFF_ESCALATION: f64 = 1.05;

/// Knobs that change how results are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionOptions {
    /// Feed battery strategy savings into the yearly cash flow
    #[serde(default)]
    pub include_battery_savings: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardProjection {
    pub system_requirements: SystemRequirements,
    pub financials: Financials,
    pub environmental: EnvironmentalImpact,
    pub monthly_breakdown: Vec<MonthlyBalance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryStrategyProjection {
    pub system_requirements: SystemRequirements,
    pub battery_usage: BatteryUsage,
    pub financials: Financials,
    pub environmental: EnvironmentalImpact,
}

/// Entry point for both quote shapes
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator {
    options: ProjectionOptions,
}

impl Calculator {
    pub fn new(options: ProjectionOptions) -> Self {
        Self { options }
    }

    fn checked(input: &CalculationInput) -> Result<SystemRequirements, CalculationError> {
        let errors = validate_input(input);
        if !errors.is_empty() {
            return Err(CalculationError::InvalidInput(errors));
        }
        Ok(estimate_requirements(input))
    }

    /// Sizing, financial and environmental projections for a tariff.
    pub fn standard_projection(
        &self,
        input: &CalculationInput,
        tariff: &Tariff,
    ) -> Result<StandardProjection, CalculationError> {
        let system_requirements = Self::checked(input)?;

        Ok(StandardProjection {
            financials: project_financials(input, &system_requirements, tariff, None),
            environmental: project_environmental(input, &system_requirements),
            monthly_breakdown: monthly_breakdown(input, &system_requirements),
            system_requirements,
        })
    }

    /// Same as [`Calculator::standard_projection`] plus a battery dispatch strategy.
    ///
    /// The battery result reaches the cash flow only when
    /// [`ProjectionOptions::include_battery_savings`] is set.
    pub fn battery_strategy_projection(
        &self,
        input: &CalculationInput,
        tariff: &Tariff,
        battery: &BatteryStrategyParams,
    ) -> Result<BatteryStrategyProjection, CalculationError> {
        let system_requirements = Self::checked(input)?;
        let battery_usage = evaluate_strategy(battery, &system_requirements)?;

        let feed = self
            .options
            .include_battery_savings
            .then_some(&battery_usage);

        Ok(BatteryStrategyProjection {
            financials: project_financials(input, &system_requirements, tariff, feed),
            environmental: project_environmental(input, &system_requirements),
            battery_usage,
            system_requirements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PeakPeriod;

    fn tariff() -> Tariff {
        Tariff::new(2.5, 0.0, 150.0)
    }

    fn battery(strategy: BatteryStrategy) -> BatteryStrategyParams {
        BatteryStrategyParams::new(
            10.0,
            strategy,
            vec![PeakPeriod::new("Peak Time", 4.0), PeakPeriod::new("Off-Peak Time", 1.2)],
        )
    }

    #[test]
    fn test_standard_projection() {
        let input = CalculationInput::new(10000.0, 90000.0).with_loan(10000.0, 9.0, 5.0);
        let result = Calculator::default().standard_projection(&input, &tariff()).unwrap();

        assert_eq!(result.system_requirements.panels_required, 9);
        assert_eq!(result.financials.projections.len(), 20);
        assert_eq!(result.environmental.projections.len(), 20);
        assert_eq!(result.monthly_breakdown.len(), 12);
    }

    #[test]
    fn test_invalid_input_stops_before_sizing() {
        let input = CalculationInput::new(-1.0, 0.0);
        let err = Calculator::default().standard_projection(&input, &tariff()).unwrap_err();

        match err {
            CalculationError::InvalidInput(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_battery_projection_ignores_savings_by_default() {
        let input = CalculationInput::new(10000.0, 90000.0);
        let calc = Calculator::default();

        let standard = calc.standard_projection(&input, &tariff()).unwrap();
        let with_battery = calc
            .battery_strategy_projection(&input, &tariff(), &battery(BatteryStrategy::EveningPeak))
            .unwrap();

        assert_eq!(standard.financials, with_battery.financials);
        assert!((with_battery.battery_usage.daily_savings - 38.0).abs() < 1e-9);
    }

    #[test]
    fn test_battery_projection_feeds_savings_when_enabled() {
        let input = CalculationInput::new(10000.0, 90000.0);
        let calc = Calculator::new(ProjectionOptions { include_battery_savings: true });

        let standard = calc.standard_projection(&input, &tariff()).unwrap();
        let with_battery = calc
            .battery_strategy_projection(&input, &tariff(), &battery(BatteryStrategy::GridCharging))
            .unwrap();

        let net = with_battery.battery_usage.net_savings.unwrap();
        let delta = with_battery.financials.projections[0].annual_savings
            - standard.financials.projections[0].annual_savings;
        assert!((delta - net * 365.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_battery_never_reaches_cash_flow() {
        let input = CalculationInput::new(10000.0, 90000.0);
        let calc = Calculator::new(ProjectionOptions { include_battery_savings: true });
        let params = battery(BatteryStrategy::GridCharging).with_efficiency(0.0);

        let err = calc
            .battery_strategy_projection(&input, &tariff(), &params)
            .unwrap_err();
        assert!(matches!(err, CalculationError::InvalidInput(_)));
    }

    #[test]
    fn test_battery_lookup_error_propagates() {
        let input = CalculationInput::new(10000.0, 90000.0);
        let params = BatteryStrategyParams::new(
            10.0,
            BatteryStrategy::GridCharging,
            vec![PeakPeriod::new("Peak Time", 4.0)],
        );

        let err = Calculator::default()
            .battery_strategy_projection(&input, &tariff(), &params)
            .unwrap_err();
        assert_eq!(err, CalculationError::MissingOffPeakPeriod);
    }
}
