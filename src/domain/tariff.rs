use serde::{Deserialize, Serialize};

/// Charge structure of a tariff as seen by the projection engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    /// Currency per kWh
    pub energy_charge: f64,
    /// Currency per kW of estimated peak demand, 0 disables it
    pub demand_charge: f64,
    /// Currency per month
    pub fixed_charge: f64,
}

impl Tariff {
    pub fn new(energy_charge: f64, demand_charge: f64, fixed_charge: f64) -> Self {
        Self {
            energy_charge,
            demand_charge,
            fixed_charge,
        }
    }

    /// A new tariff with energy and fixed charges scaled by `factor`.
    ///
    /// The demand charge is carried over unscaled.
    pub fn escalated(&self, factor: f64) -> Self {
        Self {
            energy_charge: self.energy_charge * factor,
            demand_charge: self.demand_charge,
            fixed_charge: self.fixed_charge * factor,
        }
    }

    pub fn has_demand_charge(&self) -> bool {
        self.demand_charge > 0.0
    }
}

/// A tariff structure row from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TariffStructure {
    pub id: i32,
    pub tariff_type_id: i32,
    pub name: String,
    pub energy_charge: f64,
    pub demand_charge: f64,
    pub fixed_charge: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl TariffStructure {
    pub fn tariff(&self) -> Tariff {
        Tariff::new(self.energy_charge, self.demand_charge, self.fixed_charge)
    }

    /// Whether this structure describes a peak-time window of its tariff type
    pub fn is_peak_time(&self) -> bool {
        self.name.contains("Peak Time")
    }
}

impl From<&TariffStructure> for Tariff {
    fn from(row: &TariffStructure) -> Self {
        row.tariff()
    }
}

/// A named time-of-use window and its energy rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakPeriod {
    pub name: String,
    /// Currency per kWh
    pub energy_charge: f64,
}

impl PeakPeriod {
    pub fn new(name: impl Into<String>, energy_charge: f64) -> Self {
        Self {
            name: name.into(),
            energy_charge,
        }
    }

    pub fn is_off_peak(&self) -> bool {
        self.name.contains("Off-Peak")
    }
}

impl From<&TariffStructure> for PeakPeriod {
    fn from(row: &TariffStructure) -> Self {
        Self::new(row.name.clone(), row.energy_charge)
    }
}
