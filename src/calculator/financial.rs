use serde::{Deserialize, Serialize};

use super::battery::BatteryUsage;
use super::tariff::billing_period_cost;
use super::{PANEL_DEGRADATION, PROJECTION_YEARS, TARIFF_ESCALATION};
use crate::domain::{CalculationInput, SystemRequirements, Tariff};

/// Fixed-payment loan derived from the quote's financing terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub loan_amount: f64,
    pub number_of_payments: f64,
    pub monthly_payment: f64,
    /// All payments plus the deposit
    pub total_cost: f64,
}

impl LoanTerms {
    /// Amortize `system_cost - deposit` over `loan_term * 12` monthly payments.
    ///
    /// A zero term means the system is paid outright; a zero rate spreads
    /// the principal evenly.
    pub fn from_input(input: &CalculationInput) -> Self {
        let loan_amount = input.loan_amount();
        let number_of_payments = input.loan_term * 12.0;

        if number_of_payments <= 0.0 {
            return Self {
                loan_amount,
                number_of_payments: 0.0,
                monthly_payment: 0.0,
                total_cost: input.system_cost,
            };
        }

        let monthly_rate = (input.loan_interest_rate / 100.0) / 12.0;
        // rates too small to move the compounding term fall back to an even split
        let monthly_payment = match (1.0 + monthly_rate).powf(number_of_payments) {
            growth if monthly_rate > 0.0 && growth > 1.0 => {
                loan_amount * (monthly_rate * growth) / (growth - 1.0)
            }
            _ => loan_amount / number_of_payments,
        };

        Self {
            loan_amount,
            number_of_payments,
            monthly_payment,
            total_cost: monthly_payment * number_of_payments + input.deposit,
        }
    }

    /// Sum of payments made by the end of `year`
    fn paid_through(&self, year: u32, loan_term: f64) -> f64 {
        self.monthly_payment * 12.0 * f64::from(year).min(loan_term.max(0.0))
    }
}

/// One row of the cash-flow table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialYear {
    pub year: u32,
    /// Escalated energy charge for the year
    pub cost_per_kwh: f64,
    pub annual_cost_without_solar: f64,
    /// kWh after panel degradation
    pub annual_production: f64,
    pub annual_cost_with_solar: f64,
    pub annual_savings: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_savings: Option<f64>,
    pub cumulative_savings: f64,
    /// Cumulative savings less loan payments to date
    pub cumulative_cash_flow: f64,
    pub monthly_loan_payment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    pub monthly_loan_payment: f64,
    pub total_loan_cost: f64,
    /// Year-one grid cost without any solar
    pub annual_cost_without_solar: f64,
    /// Whole years to recover the system cost at the year-one savings rate.
    /// Absent when year one saves nothing.
    pub payback_period: Option<u32>,
    pub projections: Vec<FinancialYear>,
}

/// Simple payback from year-one savings, not a break-even search
pub fn payback_period(system_cost: f64, first_year_savings: f64) -> Option<u32> {
    if first_year_savings > 0.0 {
        Some((system_cost / first_year_savings).ceil() as u32)
    } else {
        None
    }
}

/// Project twenty years of grid costs, savings and loan cash flow.
///
/// When `battery` is given its effective daily savings, escalated with the
/// tariff, are added to each year's savings.
pub fn project_financials(
    input: &CalculationInput,
    requirements: &SystemRequirements,
    tariff: &Tariff,
    battery: Option<&BatteryUsage>,
) -> Financials {
    let loan = LoanTerms::from_input(input);

    let annual_consumption = requirements.annual_consumption();
    let annual_cost_without_solar = billing_period_cost(annual_consumption / 12.0, tariff) * 12.0;

    let mut projections = Vec::with_capacity(PROJECTION_YEARS as usize);
    let mut cumulative_savings = -input.system_cost;

    for year in 1..=PROJECTION_YEARS {
        let elapsed = f64::from(year - 1);
        let degradation = PANEL_DEGRADATION.powf(elapsed);
        let escalation = TARIFF_ESCALATION.powf(elapsed);

        let annual_production = annual_consumption * degradation;
        let remaining_consumption = (annual_consumption - annual_production).max(0.0);

        let yearly_tariff = tariff.escalated(escalation);
        let annual_cost_with_solar = billing_period_cost(remaining_consumption / 12.0, &yearly_tariff) * 12.0;
        let cost_without_solar = annual_cost_without_solar * escalation;

        let battery_savings = battery.map(|b| b.effective_daily_savings() * 365.0 * escalation);
        let annual_savings =
            cost_without_solar - annual_cost_with_solar + battery_savings.unwrap_or(0.0);

        cumulative_savings += annual_savings;

        let in_term = f64::from(year) <= input.loan_term;
        projections.push(FinancialYear {
            year,
            cost_per_kwh: yearly_tariff.energy_charge,
            annual_cost_without_solar: cost_without_solar,
            annual_production,
            annual_cost_with_solar,
            annual_savings,
            battery_savings,
            cumulative_savings,
            cumulative_cash_flow: cumulative_savings - loan.paid_through(year, input.loan_term),
            monthly_loan_payment: if in_term { loan.monthly_payment } else { 0.0 },
        });
    }

    let first_year_savings = projections.first().map(|p| p.annual_savings).unwrap_or(0.0);

    Financials {
        monthly_loan_payment: loan.monthly_payment,
        total_loan_cost: loan.total_cost,
        annual_cost_without_solar,
        payback_period: payback_period(input.system_cost, first_year_savings),
        projections,
    }
}
