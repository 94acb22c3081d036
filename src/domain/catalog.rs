//! Component catalog entries offered when building a quote.

use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// Solar panel model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SolarPanel {
    pub id: i32,
    pub manufacturer: String,
    pub model: String,
    /// Rated output in W
    pub wattage: f64,
    /// Module efficiency (0-1)
    pub efficiency: f64,
    pub price: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Battery model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BatteryModule {
    pub id: i32,
    pub manufacturer: String,
    pub model: String,
    pub capacity_kwh: f64,
    /// Round-trip efficiency (0-1)
    pub efficiency: f64,
    pub price: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Inverter model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Inverter {
    pub id: i32,
    pub manufacturer: String,
    pub model: String,
    pub rated_power_kw: f64,
    pub price: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}
