#![cfg(feature = "db")]

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::CatalogStore;
use crate::domain::{BatteryModule, Inverter, SolarPanel, TariffStructure};

const TARIFF_COLUMNS: &str =
    "id, tariff_type_id, name, energy_charge, demand_charge, fixed_charge, is_active";

pub struct PgRepo {
    pub pool: PgPool,
}

impl PgRepo {
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl CatalogStore for PgRepo {
    async fn find_tariff(&self, id: i32) -> Result<Option<TariffStructure>> {
        let row = sqlx::query_as::<_, TariffStructure>(&format!(
            "SELECT {TARIFF_COLUMNS} FROM tariff_structures WHERE id = $1 AND is_active = true"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn peak_periods(&self, tariff_type_id: i32) -> Result<Vec<TariffStructure>> {
        let rows = sqlx::query_as::<_, TariffStructure>(&format!(
            "SELECT {TARIFF_COLUMNS} FROM tariff_structures \
             WHERE tariff_type_id = $1 AND is_active = true AND name LIKE $2 \
             ORDER BY id ASC"
        ))
        .bind(tariff_type_id)
        .bind("%Peak Time%")
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_tariffs(&self) -> Result<Vec<TariffStructure>> {
        let rows = sqlx::query_as::<_, TariffStructure>(&format!(
            "SELECT {TARIFF_COLUMNS} FROM tariff_structures WHERE is_active = true ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_panels(&self) -> Result<Vec<SolarPanel>> {
        let rows = sqlx::query_as::<_, SolarPanel>(
            r#"
            SELECT id, manufacturer, model, wattage, efficiency, price, is_active
            FROM solar_panels
            WHERE is_active = true
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_batteries(&self) -> Result<Vec<BatteryModule>> {
        let rows = sqlx::query_as::<_, BatteryModule>(
            r#"
            SELECT id, manufacturer, model, capacity_kwh, efficiency, price, is_active
            FROM batteries
            WHERE is_active = true
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_inverters(&self) -> Result<Vec<Inverter>> {
        let rows = sqlx::query_as::<_, Inverter>(
            r#"
            SELECT id, manufacturer, model, rated_power_kw, price, is_active
            FROM inverters
            WHERE is_active = true
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
