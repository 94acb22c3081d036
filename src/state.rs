use anyhow::Result;
use std::sync::Arc;

use crate::calculator::Calculator;
use crate::config::Config;
use crate::repo::Repositories;

#[derive(Clone)]
pub struct AppState {
    pub calculator: Calculator,
    pub repos: Arc<Repositories>,
}

impl AppState {
    pub fn new(calculator: Calculator, repos: Repositories) -> Self {
        Self {
            calculator,
            repos: Arc::new(repos),
        }
    }

    pub async fn from_config(cfg: &Config) -> Result<Self> {
        let repos = Repositories::from_config(cfg).await?;
        Ok(Self::new(Calculator::new(cfg.calculation), repos))
    }
}
