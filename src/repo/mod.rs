use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::domain::{BatteryModule, Inverter, SolarPanel, TariffStructure};

pub mod memory;
#[cfg(feature = "db")]
pub mod pg;

pub use memory::MemoryCatalog;

/// Read access to the component and tariff catalog.
///
/// Every listing returns active entries only.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_tariff(&self, id: i32) -> Result<Option<TariffStructure>>;

    /// Peak-time structures sharing a tariff type, in id order
    async fn peak_periods(&self, tariff_type_id: i32) -> Result<Vec<TariffStructure>>;

    async fn list_tariffs(&self) -> Result<Vec<TariffStructure>>;
    async fn list_panels(&self) -> Result<Vec<SolarPanel>>;
    async fn list_batteries(&self) -> Result<Vec<BatteryModule>>;
    async fn list_inverters(&self) -> Result<Vec<Inverter>>;
}

pub struct Repositories {
    pub catalog: Arc<dyn CatalogStore>,
}

impl Repositories {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    pub async fn from_config(cfg: &Config) -> Result<Self> {
        #[cfg(feature = "db")]
        {
            if !cfg.db.url.is_empty() {
                info!("using postgres catalog");
                let pg = crate::repo::pg::PgRepo::connect(&cfg.db.url).await?;
                return Ok(Self::new(Arc::new(pg)));
            }
        }

        info!(path = %cfg.catalog.seed_path.display(), "using in-memory catalog");
        let catalog = MemoryCatalog::load(&cfg.catalog.seed_path)?;
        Ok(Self::new(Arc::new(catalog)))
    }
}
