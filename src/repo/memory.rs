//! Catalog held in memory, seeded from a TOML file

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

use super::CatalogStore;
use crate::domain::{BatteryModule, Inverter, SolarPanel, TariffStructure};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryCatalog {
    #[serde(default)]
    tariffs: Vec<TariffStructure>,
    #[serde(default)]
    panels: Vec<SolarPanel>,
    #[serde(default)]
    batteries: Vec<BatteryModule>,
    #[serde(default)]
    inverters: Vec<Inverter>,
}

impl MemoryCatalog {
    pub fn from_toml_str(seed: &str) -> Result<Self> {
        let mut catalog: Self = toml::from_str(seed).context("invalid catalog seed")?;
        catalog.tariffs.sort_by_key(|t| t.id);
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let seed = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog seed {}", path.display()))?;
        Self::from_toml_str(&seed)
    }
}

fn active<T: Clone>(items: &[T], is_active: impl Fn(&T) -> bool) -> Vec<T> {
    items.iter().filter(|i| is_active(i)).cloned().collect()
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn find_tariff(&self, id: i32) -> Result<Option<TariffStructure>> {
        Ok(self.tariffs.iter().find(|t| t.id == id && t.is_active).cloned())
    }

    async fn peak_periods(&self, tariff_type_id: i32) -> Result<Vec<TariffStructure>> {
        Ok(self
            .tariffs
            .iter()
            .filter(|t| t.tariff_type_id == tariff_type_id && t.is_active && t.is_peak_time())
            .cloned()
            .collect())
    }

    async fn list_tariffs(&self) -> Result<Vec<TariffStructure>> {
        Ok(active(&self.tariffs, |t| t.is_active))
    }

    async fn list_panels(&self) -> Result<Vec<SolarPanel>> {
        Ok(active(&self.panels, |p| p.is_active))
    }

    async fn list_batteries(&self) -> Result<Vec<BatteryModule>> {
        Ok(active(&self.batteries, |b| b.is_active))
    }

    async fn list_inverters(&self) -> Result<Vec<Inverter>> {
        Ok(active(&self.inverters, |i| i.is_active))
    }
}
