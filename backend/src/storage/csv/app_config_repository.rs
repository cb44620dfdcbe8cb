//! # App Config Repository
//!
//! File-based application configuration stored as a single YAML file
//! `app_config.yaml` at the root of the data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! business_name: "Plant Ledger"
//! currency_symbol: "Rs."
//! decimal_places: 2
//! default_sort_field: net_balance
//! default_sort_direction: descending
//! data_format_version: "1.0"
//! created_at: "2025-01-21T19:30:00Z"
//! updated_at: "2025-01-21T19:35:00Z"
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use shared::{LedgerSortField, SortDirection};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use super::connection::CsvConnection;

pub const APP_CONFIG_FILE: &str = "app_config.yaml";

/// Application-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub business_name: String,
    /// Printed in front of amounts in reports
    pub currency_symbol: String,
    /// Decimal places used when amounts are rendered
    pub decimal_places: u8,
    pub default_sort_field: LedgerSortField,
    pub default_sort_direction: SortDirection,
    /// Data format version for future migrations
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            business_name: "Plant Ledger".to_string(),
            currency_symbol: String::new(),
            decimal_places: 2,
            default_sort_field: LedgerSortField::NetBalance,
            default_sort_direction: SortDirection::Descending,
            data_format_version: "1.0".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// YAML-backed config repository
#[derive(Clone)]
pub struct AppConfigRepository {
    connection: Arc<CsvConnection>,
}

impl AppConfigRepository {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }

    fn config_path(&self) -> PathBuf {
        self.connection.file_path(APP_CONFIG_FILE)
    }

    /// Load the config, creating the default file if it doesn't exist
    pub fn load_or_create(&self) -> Result<AppConfig> {
        let config_path = self.config_path();

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)?;
            let config: AppConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;
            debug!("Loaded app config from {:?}", config_path);
            Ok(config)
        } else {
            let config = AppConfig::default();
            self.save(&config)?;
            info!("Created default app config at {:?}", config_path);
            Ok(config)
        }
    }

    /// Persist the config, bumping `updated_at`
    pub fn update(&self, config: &AppConfig) -> Result<AppConfig> {
        let mut config = config.clone();
        config.updated_at = Utc::now().to_rfc3339();
        self.save(&config)?;
        Ok(config)
    }

    fn save(&self, config: &AppConfig) -> Result<()> {
        let config_path = self.config_path();
        let yaml_content = serde_yaml::to_string(config)?;

        let temp_path = config_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &config_path)?;

        debug!("Saved app config to {:?}", config_path);
        Ok(())
    }
}
