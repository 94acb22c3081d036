use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::calculator::ProjectionOptions;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub db: DbConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub calculation: ProjectionOptions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub enable_cors: bool,
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// Postgres connection; an empty url selects the in-memory catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DbConfig {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub seed_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file("config/default.toml"))
                .merge(Env::prefixed("SOLAR__").split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 3001

        [catalog]
        seed_path = "config/catalog.toml"
    "#;

    #[test]
    fn test_defaults_fill_optional_sections() {
        let cfg = Config::from_figment(Figment::new().merge(Toml::string(SAMPLE))).unwrap();

        assert_eq!(cfg.server.socket_addr().unwrap().port(), 3001);
        assert_eq!(cfg.server.request_timeout_secs, 30);
        assert!(!cfg.server.enable_cors);
        assert!(cfg.db.url.is_empty());
        assert!(!cfg.calculation.include_battery_savings);
    }

    #[test]
    fn test_calculation_section() {
        let toml = format!("{SAMPLE}\n[calculation]\ninclude_battery_savings = true\n");
        let cfg = Config::from_figment(Figment::new().merge(Toml::string(&toml))).unwrap();
        assert!(cfg.calculation.include_battery_savings);
    }

    #[test]
    fn test_missing_server_section_fails() {
        let result = Config::from_figment(Figment::new().merge(Toml::string("[catalog]\nseed_path = \"x\"")));
        assert!(result.is_err());
    }
}
