use serde::{Deserialize, Serialize};

use super::{PANEL_DEGRADATION, PROJECTION_YEARS};
use crate::domain::{CalculationInput, SystemRequirements};

/// Trees needed to absorb one ton of CO2 per year
pub const TREES_PER_TON: f64 = 45.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalYear {
    pub year: u32,
    /// kg CO2 per kWh after grid decarbonization
    pub carbon_intensity: f64,
    /// kWh
    pub annual_production: f64,
    /// Tons of CO2
    pub annual_offset: f64,
    pub cumulative_offset: f64,
    pub trees_equivalent: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalImpact {
    pub first_year_offset: f64,
    pub twenty_year_offset: f64,
    pub projections: Vec<EnvironmentalYear>,
}

/// Project twenty years of avoided emissions.
///
/// Production is taken as the full annual consumption, independent of the
/// grid fallback the financial projection models.
pub fn project_environmental(
    input: &CalculationInput,
    requirements: &SystemRequirements,
) -> EnvironmentalImpact {
    let baseline_production = requirements.annual_consumption();
    let decarbonization = 1.0 - input.annual_reduction_rate / 100.0;

    let mut projections = Vec::with_capacity(PROJECTION_YEARS as usize);
    let mut cumulative_offset = 0.0;

    for year in 1..=PROJECTION_YEARS {
        let elapsed = f64::from(year - 1);
        let carbon_intensity = input.carbon_intensity * decarbonization.powf(elapsed);
        let annual_production = baseline_production * PANEL_DEGRADATION.powf(elapsed);

        let annual_offset = annual_production * carbon_intensity / 1000.0;
        cumulative_offset += annual_offset;

        projections.push(EnvironmentalYear {
            year,
            carbon_intensity,
            annual_production,
            annual_offset,
            cumulative_offset,
            trees_equivalent: (annual_offset * TREES_PER_TON).round().max(0.0) as u64,
        });
    }

    EnvironmentalImpact {
        first_year_offset: projections.first().map(|p| p.annual_offset).unwrap_or(0.0),
        twenty_year_offset: cumulative_offset,
        projections,
    }
}
